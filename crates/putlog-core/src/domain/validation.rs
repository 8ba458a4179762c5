use crate::domain::{
    entities::{
        common::validate_segment,
        structure::{Entry, Structure},
    },
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Every segment name in the tree must be a valid path segment.
    ///
    /// `with_file` / `with_dir` accept any string so extensions can build
    /// trees literally; this is the check that runs before materialization.
    pub fn validate_structure(structure: &Structure) -> Result<(), DomainError> {
        validate_tree(structure, &mut Vec::new())
    }
}

fn validate_tree(tree: &Structure, prefix: &mut Vec<String>) -> Result<(), DomainError> {
    for (name, entry) in tree {
        prefix.push(name.clone());
        validate_segment(name, &prefix.join("/"))?;
        if let Entry::Tree(sub) = entry {
            validate_tree(sub, prefix)?;
        }
        prefix.pop();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_tree() {
        let s = Structure::new().with_dir("src", Structure::new().with_file("main.py", ""));
        assert!(DomainValidator::validate_structure(&s).is_ok());
    }

    #[test]
    fn rejects_bad_names_at_any_depth() {
        let s = Structure::new().with_dir("src", Structure::new().with_file("a/b.py", ""));
        assert!(matches!(
            DomainValidator::validate_structure(&s),
            Err(DomainError::InvalidPath { .. })
        ));

        let s = Structure::new().with_dir("", Structure::new());
        assert!(matches!(
            DomainValidator::validate_structure(&s),
            Err(DomainError::EmptySegment { .. })
        ));
    }
}
