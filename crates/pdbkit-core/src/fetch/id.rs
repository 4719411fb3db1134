use super::error::FetchError;
use std::fmt;
use std::str::FromStr;

/// A four-character PDB identifier, stored in lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PdbId(String);

impl PdbId {
    /// Validates `id` after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidStructure`] unless the identifier is four ASCII
    /// alphanumerics starting with a digit.
    pub fn parse(id: &str) -> Result<Self, FetchError> {
        let trimmed = id.trim();
        let invalid = |reason: &str| FetchError::InvalidStructure {
            id: id.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.len() != 4 {
            return Err(invalid("identifier must be 4 characters"));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid("identifier must be alphanumeric"));
        }
        if !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid("identifier must start with a digit"));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The middle two characters, used as the hashed sub-directory of archives.
    pub fn middle(&self) -> &str {
        &self.0[1..3]
    }
}

impl fmt::Display for PdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PdbId {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureFormat {
    /// Legacy fixed-column PDB format (`.ent`).
    Pdb,
    MmCif,
}

impl StructureFormat {
    /// Short tag reported to callers.
    pub fn tag(self) -> &'static str {
        match self {
            StructureFormat::Pdb => "pdb",
            StructureFormat::MmCif => "mmcif",
        }
    }

    fn mirror_extension(self) -> &'static str {
        match self {
            StructureFormat::Pdb => "ent",
            StructureFormat::MmCif => "mmcif",
        }
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One (format, obsolete) combination under which an entry may be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryVariant {
    pub format: StructureFormat,
    pub obsolete: bool,
}

/// Lookup order: current entries before obsolete ones, legacy format first.
pub const ENTRY_VARIANTS: [EntryVariant; 4] = [
    EntryVariant::new(StructureFormat::Pdb, false),
    EntryVariant::new(StructureFormat::MmCif, false),
    EntryVariant::new(StructureFormat::Pdb, true),
    EntryVariant::new(StructureFormat::MmCif, true),
];

impl EntryVariant {
    pub const fn new(format: StructureFormat, obsolete: bool) -> Self {
        Self { format, obsolete }
    }

    /// File name of the compressed mirror copy, e.g. `pdb1abc.ent.gz`.
    pub fn mirror_file_name(&self, id: &PdbId) -> String {
        format!("pdb{}.{}.gz", id, self.format.mirror_extension())
    }

    /// Object-store key, e.g. `ab/pdb1abc.ent.gz` or `obsolete/ab/pdb1abc.mmcif.gz`.
    pub fn mirror_key(&self, id: &PdbId) -> String {
        let prefix = if self.obsolete { "obsolete/" } else { "" };
        format!("{}{}/{}", prefix, id.middle(), self.mirror_file_name(id))
    }
}

impl fmt::Display for EntryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.obsolete {
            write!(f, "{} (obsolete)", self.format)
        } else {
            write!(f, "{}", self.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let id = PdbId::parse(" 1ABC ").unwrap();
        assert_eq!(id.as_str(), "1abc");
        assert_eq!(id.middle(), "ab");
        assert_eq!("4HHB".parse::<PdbId>().unwrap().to_string(), "4hhb");
    }

    #[test]
    fn parse_rejects_malformed_identifiers() {
        for bad in ["", "1ab", "1abcd", "abcd", "1a-c"] {
            assert!(
                matches!(PdbId::parse(bad), Err(FetchError::InvalidStructure { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn mirror_keys_follow_hashed_layout() {
        let id = PdbId::parse("1abc").unwrap();
        let keys: Vec<String> = ENTRY_VARIANTS.iter().map(|v| v.mirror_key(&id)).collect();
        assert_eq!(
            keys,
            vec![
                "ab/pdb1abc.ent.gz",
                "ab/pdb1abc.mmcif.gz",
                "obsolete/ab/pdb1abc.ent.gz",
                "obsolete/ab/pdb1abc.mmcif.gz",
            ]
        );
    }

    #[test]
    fn mirror_file_name_drops_obsolete_prefix() {
        let id = PdbId::parse("1abc").unwrap();
        let variant = EntryVariant::new(StructureFormat::MmCif, true);
        assert_eq!(variant.mirror_file_name(&id), "pdb1abc.mmcif.gz");
    }
}
