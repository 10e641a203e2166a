/// A single field of a partial update.
///
/// Distinguishes a field the caller left out from one the caller explicitly
/// cleared, which a plain `Option` cannot express.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    /// Writes the patch into an optional field.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Patch::Unchanged => {}
            Patch::Clear => *target = None,
            Patch::Set(value) => *target = Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_distinguishes_clear_from_unchanged() {
        let mut field = Some("card".to_string());
        Patch::Unchanged.apply_to(&mut field);
        assert_eq!(field.as_deref(), Some("card"));

        Patch::Set("cash".to_string()).apply_to(&mut field);
        assert_eq!(field.as_deref(), Some("cash"));

        Patch::Clear.apply_to(&mut field);
        assert_eq!(field, None);
    }
}
