use std::collections::HashMap;

use crate::table::{Row, Table};

/// Rows sharing one key-column value, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub key: &'a str,
    pub rows: Vec<&'a Row>,
}

impl Group<'_> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Groups rows by the first column.
///
/// Groups come back in order of first appearance of their key. Keys compare
/// as exact text, so `1` and `1.0` land in different groups.
pub fn group_by_key(table: &Table) -> Vec<Group<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group<'_>> = Vec::new();

    for row in table.rows() {
        let key = row.first().map(String::as_str).unwrap_or_default();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                key,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(row);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn table(text: &str) -> Table {
        Table::from_reader(text.as_bytes(), false).unwrap()
    }

    #[test]
    fn test_first_appearance_order() {
        let table = table(indoc! {"
            B\t1
            A\t2
            B\t3
            C\t4
        "});
        let keys: Vec<&str> = group_by_key(&table).iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_rows_keep_source_order() {
        let table = table("A\t1\nB\t2\nA\t3\nA\t4\nB\t5\n");
        let groups = group_by_key(&table);

        let a: Vec<&str> = groups[0].rows.iter().map(|r| r[1].as_str()).collect();
        let b: Vec<&str> = groups[1].rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(a, vec!["1", "3", "4"]);
        assert_eq!(b, vec!["2", "5"]);
    }

    #[test]
    fn test_no_coercion_between_keys() {
        let table = table("1\ta\n1.0\tb\n01\tc\n1\td\n");
        let groups = group_by_key(&table);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].key, "1");
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_empty_key_is_its_own_group() {
        let table = table("\t1\nA\t2\n\t3\n");
        let groups = group_by_key(&table);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "");
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_header_only_has_no_groups() {
        let table = Table::from_reader("k\tv\n".as_bytes(), true).unwrap();
        assert!(group_by_key(&table).is_empty());
    }
}
