//! # Schema Registry
//!
//! Static mapping from asset-type name to its validation rules: where the
//! files live, how they must be named, and which metadata fields they must
//! and may carry.
//!
//! ## Immutability
//!
//! A [`Registry`] is built once, either from the built-in table or from a
//! YAML registry file, and exposes no mutating API afterwards. Adding an
//! asset type means adding an entry, not touching the checks.
//!
//! ## Construction Rules
//!
//! Every entry is validated when the registry is built:
//! - the filename pattern must compile,
//! - `required_fields` must be non-empty,
//! - asset-type names must be unique,
//! - every content probe must have at least one needle.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use acde_core::RegistryError;
use regex::Regex;
use serde::Deserialize;
use serde_yaml::Mapping;

use crate::frontmatter::key_name;

/// A heuristic text-presence check on a document.
///
/// Satisfied when the raw document text contains at least one of the
/// needles. An unsatisfied probe yields a `content_structure` warning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentProbe {
    any_of: Vec<String>,
    message: String,
}

impl ContentProbe {
    pub fn new<I, S>(any_of: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            any_of: any_of.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn is_satisfied_by(&self, text: &str) -> bool {
        self.any_of.iter().any(|needle| text.contains(needle.as_str()))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Uncompiled description of an asset type, as written in a registry file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetTypeSpec {
    /// Asset-type name (e.g. `prompts`).
    pub name: String,
    /// Directory holding the files, relative to the run root.
    pub directory: PathBuf,
    /// Regular expression the file's base name must match.
    pub pattern: String,
    /// Fields that must be present and truthy.
    pub required_fields: Vec<String>,
    /// Fields that may be present.
    #[serde(default)]
    pub optional_fields: Vec<String>,
    /// Soft body checks.
    #[serde(default)]
    pub content_probes: Vec<ContentProbe>,
}

/// Validation rules for one asset type.
#[derive(Debug, Clone)]
pub struct AssetTypeConfig {
    name: String,
    directory: PathBuf,
    name_pattern: Regex,
    required_fields: Vec<String>,
    optional_fields: Vec<String>,
    content_probes: Vec<ContentProbe>,
}

impl AssetTypeConfig {
    /// Compile and check a spec.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidPattern` if the pattern does not
    /// compile, `RegistryError::NoRequiredFields` if no required field is
    /// declared, and `RegistryError::EmptyProbe` for a probe with no needles.
    pub fn compile(spec: AssetTypeSpec) -> Result<Self, RegistryError> {
        let name_pattern =
            Regex::new(&spec.pattern).map_err(|e| RegistryError::InvalidPattern {
                asset_type: spec.name.clone(),
                pattern: spec.pattern.clone(),
                reason: e.to_string(),
            })?;

        let required_fields = dedup(spec.required_fields);
        if required_fields.is_empty() {
            return Err(RegistryError::NoRequiredFields {
                asset_type: spec.name,
            });
        }

        if spec.content_probes.iter().any(|p| p.any_of.is_empty()) {
            return Err(RegistryError::EmptyProbe {
                asset_type: spec.name,
            });
        }

        Ok(Self {
            name: spec.name,
            directory: spec.directory,
            name_pattern,
            required_fields,
            optional_fields: dedup(spec.optional_fields),
            content_probes: spec.content_probes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn name_pattern(&self) -> &Regex {
        &self.name_pattern
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    pub fn optional_fields(&self) -> &[String] {
        &self.optional_fields
    }

    pub fn content_probes(&self) -> &[ContentProbe] {
        &self.content_probes
    }

    /// Whether a file's base name follows this type's naming convention.
    pub fn matches_name(&self, file_name: &str) -> bool {
        self.name_pattern.is_match(file_name)
    }

    /// The capability set: `required_fields ∪ optional_fields`.
    pub fn allowed_fields(&self) -> HashSet<&str> {
        self.required_fields
            .iter()
            .chain(&self.optional_fields)
            .map(String::as_str)
            .collect()
    }

    /// Keys of `metadata` outside the capability set, in mapping order.
    pub fn unknown_fields(&self, metadata: &Mapping) -> Vec<String> {
        let allowed = self.allowed_fields();
        metadata
            .keys()
            .map(key_name)
            .filter(|key| !allowed.contains(key.as_str()))
            .collect()
    }
}

fn dedup(fields: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    fields
        .into_iter()
        .filter(|f| seen.insert(f.clone()))
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    asset_types: Vec<AssetTypeSpec>,
}

/// The set of asset types a run validates, in traversal order.
#[derive(Debug, Clone)]
pub struct Registry {
    asset_types: Vec<AssetTypeConfig>,
}

impl Registry {
    /// Build a registry from specs, preserving their order.
    pub fn new(specs: impl IntoIterator<Item = AssetTypeSpec>) -> Result<Self, RegistryError> {
        let mut asset_types: Vec<AssetTypeConfig> = Vec::new();
        for spec in specs {
            if asset_types.iter().any(|c| c.name == spec.name) {
                return Err(RegistryError::DuplicateAssetType(spec.name));
            }
            asset_types.push(AssetTypeConfig::compile(spec)?);
        }
        Ok(Self { asset_types })
    }

    /// The four asset types of the Data Engineering collection.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(builtin_specs())
    }

    /// Decode a registry from YAML text. `origin` names the source in errors.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile =
            serde_yaml::from_str(yaml).map_err(|e| RegistryError::InvalidConfig {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
        Self::new(file.asset_types)
    }

    /// Load a registry file from disk.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml, &path.display().to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetTypeConfig> {
        self.asset_types.iter()
    }

    pub fn get(&self, name: &str) -> Option<&AssetTypeConfig> {
        self.asset_types.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.asset_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asset_types.is_empty()
    }

    /// Pick the asset type responsible for `path`.
    ///
    /// A type whose directory contains the path wins; otherwise the first
    /// type whose pattern matches the file name is used.
    pub fn resolve(&self, root: &Path, path: &Path) -> Option<&AssetTypeConfig> {
        let by_directory = self.asset_types.iter().find(|c| {
            path.starts_with(root.join(&c.directory)) || path.starts_with(&c.directory)
        });
        if by_directory.is_some() {
            return by_directory;
        }

        let file_name = path.file_name()?.to_string_lossy();
        self.asset_types.iter().find(|c| c.matches_name(&file_name))
    }
}

fn builtin_specs() -> Vec<AssetTypeSpec> {
    fn spec(
        name: &str,
        directory: &str,
        pattern: &str,
        required: &[&str],
        optional: &[&str],
        content_probes: Vec<ContentProbe>,
    ) -> AssetTypeSpec {
        AssetTypeSpec {
            name: name.to_string(),
            directory: PathBuf::from(directory),
            pattern: pattern.to_string(),
            required_fields: required.iter().map(|s| s.to_string()).collect(),
            optional_fields: optional.iter().map(|s| s.to_string()).collect(),
            content_probes,
        }
    }

    vec![
        spec(
            "prompts",
            "prompts/de",
            r"\.prompt\.md$",
            &["description", "mode", "model"],
            &["tools"],
            vec![],
        ),
        spec(
            "chatmodes",
            "chatmodes/de",
            r"\.chatmode\.md$",
            &["name", "description", "capabilities", "boundaries"],
            &["commands", "activation"],
            vec![],
        ),
        spec(
            "instructions",
            "instructions/de",
            r"\.instructions\.md$",
            &["name", "globs", "rules"],
            &["autofix_hints"],
            vec![ContentProbe::new(
                ["rules:", "rules ="],
                "Missing rules section",
            )],
        ),
        spec(
            "patterns",
            "patterns",
            r"^pattern-.*\.prompt\.md$",
            &["description", "mode", "model"],
            &["tools"],
            vec![],
        ),
    ]
}
