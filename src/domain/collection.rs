use uuid::Uuid;

/// A stored record addressed by its identifier
pub trait Identified {
    fn id(&self) -> Uuid;
}

/// Insert a new record at the front of the list (newest first)
pub fn prepend<T>(items: &mut Vec<T>, item: T) {
    items.insert(0, item);
}

/// Replace the record with the same identifier. Returns false if none matched.
pub fn replace_by_id<T: Identified>(items: &mut [T], updated: T) -> bool {
    match items.iter_mut().find(|item| item.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Remove the record with the given identifier. Returns false if none matched.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

pub fn find_by_id_mut<T: Identified>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

pub fn find_by_id<T: Identified>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: Uuid,
        label: &'static str,
    }

    impl Identified for Row {
        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn row(label: &'static str) -> Row {
        Row {
            id: Uuid::new_v4(),
            label,
        }
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut rows = vec![row("old")];
        prepend(&mut rows, row("new"));
        assert_eq!(rows[0].label, "new");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_replace_by_id() {
        let first = row("a");
        let mut rows = vec![first.clone(), row("b")];

        let updated = Row {
            id: first.id,
            label: "a2",
        };
        assert!(replace_by_id(&mut rows, updated));
        assert_eq!(rows[0].label, "a2");

        assert!(!replace_by_id(&mut rows, row("missing")));
    }

    #[test]
    fn test_remove_by_id() {
        let keep = row("keep");
        let drop = row("drop");
        let mut rows = vec![keep.clone(), drop.clone()];

        assert!(remove_by_id(&mut rows, drop.id));
        assert_eq!(rows, vec![keep]);
        assert!(!remove_by_id(&mut rows, drop.id));
    }
}
