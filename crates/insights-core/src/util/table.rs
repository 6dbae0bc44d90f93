//! Table header grouping.
//!
//! Pivoted results come back with flat column labels like
//! `Region___Sales`; the table renderer needs them grouped into a header
//! tree with column spans.

/// One node of a grouped header tree.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderNode {
    pub label: String,
    /// Number of leaf columns under this node
    pub span: usize,
    pub children: Vec<HeaderNode>,
}

/// Groups flat delimiter-joined column labels into a header tree.
///
/// Adjacent columns sharing a leading segment merge under one node; the
/// grouping never reorders columns, so non-adjacent repeats stay separate
/// (matching how the pivoted result lays columns out).
pub fn group_table_headers(columns: &[String], delimiter: &str) -> Vec<HeaderNode> {
    let split: Vec<Vec<&str>> = columns
        .iter()
        .map(|column| column.split(delimiter).collect())
        .collect();
    group_level(&split, 0)
}

fn group_level(columns: &[Vec<&str>], depth: usize) -> Vec<HeaderNode> {
    let mut nodes: Vec<HeaderNode> = Vec::new();
    let mut index = 0;

    while index < columns.len() {
        let Some(label) = columns[index].get(depth) else {
            index += 1;
            continue;
        };
        let mut end = index + 1;
        while end < columns.len() && columns[end].get(depth) == Some(label) {
            end += 1;
        }

        let group = &columns[index..end];
        let has_children = group.iter().any(|parts| parts.len() > depth + 1);
        let children = if has_children {
            group_level(group, depth + 1)
        } else {
            Vec::new()
        };
        nodes.push(HeaderNode {
            label: (*label).to_string(),
            span: group.len(),
            children,
        });
        index = end;
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_flat_columns_stay_flat() {
        let headers = group_table_headers(&cols(&["city", "total"]), "___");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].label, "city");
        assert_eq!(headers[0].span, 1);
        assert!(headers[0].children.is_empty());
    }

    #[test]
    fn test_adjacent_columns_group_with_spans() {
        let headers = group_table_headers(
            &cols(&["city", "East___sales", "East___profit", "West___sales"]),
            "___",
        );
        assert_eq!(headers.len(), 3);

        assert_eq!(headers[1].label, "East");
        assert_eq!(headers[1].span, 2);
        assert_eq!(headers[1].children.len(), 2);
        assert_eq!(headers[1].children[0].label, "sales");

        assert_eq!(headers[2].label, "West");
        assert_eq!(headers[2].span, 1);
    }

    #[test]
    fn test_three_levels() {
        let headers = group_table_headers(
            &cols(&["2024___Q1___sales", "2024___Q1___profit", "2024___Q2___sales"]),
            "___",
        );
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].span, 3);
        assert_eq!(headers[0].children.len(), 2);
        assert_eq!(headers[0].children[0].span, 2);
    }

    #[test]
    fn test_non_adjacent_repeats_stay_separate() {
        let headers =
            group_table_headers(&cols(&["East___a", "West___b", "East___c"]), "___");
        assert_eq!(headers.len(), 3);
    }
}
