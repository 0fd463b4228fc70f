// File: crates/pivotal-core/src/sort.rs
// Summary: Explicit, label and value ordering of pivot rows or columns.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::label::Label;
use crate::pivot::Pivot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    Label,
    Value,
}

/// Which pivot axis a sort applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOn {
    Index,
    Columns,
}

impl SortOn {
    fn name(&self) -> &'static str {
        match self {
            SortOn::Index => "index",
            SortOn::Columns => "columns",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSort")]
pub enum SortSpec {
    /// Exactly these labels, in this order.
    Explicit(Vec<Label>),
    By { direction: Direction, by: SortBy },
}

impl SortSpec {
    pub fn asc(by: SortBy) -> Self { SortSpec::By { direction: Direction::Asc, by } }

    pub fn desc(by: SortBy) -> Self { SortSpec::By { direction: Direction::Desc, by } }

    pub fn explicit<L: Into<Label>>(labels: impl IntoIterator<Item = L>) -> Self {
        SortSpec::Explicit(labels.into_iter().map(Into::into).collect())
    }

    /// Reorder `pivot` along `on`.
    pub fn apply(&self, pivot: &Pivot, on: SortOn) -> Result<Pivot> {
        let labels = match on {
            SortOn::Index => &pivot.index,
            SortOn::Columns => &pivot.columns,
        };

        let order: Vec<usize> = match self {
            SortSpec::Explicit(wanted) => {
                let missing: Vec<Label> =
                    wanted.iter().filter(|w| !labels.contains(w)).cloned().collect();
                if !missing.is_empty() {
                    return Err(Error::UnknownLabels { axis: on.name(), labels: missing });
                }
                let mut order: Vec<usize> = Vec::with_capacity(wanted.len());
                for pos in wanted.iter().filter_map(|w| labels.iter().position(|l| l == w)) {
                    if !order.contains(&pos) {
                        order.push(pos);
                    }
                }
                order
            }
            SortSpec::By { direction, by } => {
                let totals = match (by, on) {
                    (SortBy::Label, _) => Vec::new(),
                    (SortBy::Value, SortOn::Index) => pivot.row_totals(),
                    (SortBy::Value, SortOn::Columns) => pivot.column_totals(),
                };
                let cmp = |a: usize, b: usize| match by {
                    SortBy::Label => labels[a].cmp(&labels[b]),
                    SortBy::Value => totals[a].total_cmp(&totals[b]),
                };
                let mut order: Vec<usize> = (0..labels.len()).collect();
                // Stable sort; descending flips the comparison so ties keep their order.
                match direction {
                    Direction::Asc => order.sort_by(|&a, &b| cmp(a, b)),
                    Direction::Desc => order.sort_by(|&a, &b| cmp(b, a)),
                }
                order
            }
        };

        Ok(match on {
            SortOn::Index => pivot.select_rows(&order),
            SortOn::Columns => pivot.select_columns(&order),
        })
    }
}

impl FromStr for SortSpec {
    type Err = Error;

    /// `asc:label`, `desc:value`, or a comma separated label list.
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        if let Some((dir, by)) = t.split_once(':') {
            let direction = match dir.trim().to_ascii_lowercase().as_str() {
                "asc" => Some(Direction::Asc),
                "desc" => Some(Direction::Desc),
                _ => None,
            };
            let by = match by.trim().to_ascii_lowercase().as_str() {
                "label" => Some(SortBy::Label),
                "value" => Some(SortBy::Value),
                _ => None,
            };
            if let (Some(direction), Some(by)) = (direction, by) {
                return Ok(SortSpec::By { direction, by });
            }
        }
        let labels: Vec<Label> = t.split(',').filter(|p| !p.trim().is_empty()).map(Label::parse).collect();
        if labels.is_empty() {
            return Err(Error::InvalidSortSpec(s.to_string()));
        }
        Ok(SortSpec::Explicit(labels))
    }
}

/// Config form: a spec string or a list of labels.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSort {
    Spec(String),
    List(Vec<RawLabel>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Int(i64),
    Text(String),
}

impl TryFrom<RawSort> for SortSpec {
    type Error = Error;

    fn try_from(raw: RawSort) -> Result<Self> {
        match raw {
            RawSort::Spec(s) => s.parse(),
            RawSort::List(items) => Ok(SortSpec::Explicit(
                items
                    .into_iter()
                    .map(|i| match i {
                        RawLabel::Int(v) => Label::Int(v),
                        RawLabel::Text(t) => Label::parse(&t),
                    })
                    .collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pivot() -> Pivot {
        // row totals: b=5, a=1, c=5 ; column totals: x=6, y=5
        Pivot::from_dense(
            vec!["b".into(), "a".into(), "c".into()],
            vec!["y".into(), "x".into()],
            vec![vec![2.0, 3.0], vec![1.0, 0.0], vec![2.0, 3.0]],
        )
    }

    fn idx(p: &Pivot) -> Vec<String> { p.index.iter().map(|l| l.to_string()).collect() }

    #[test]
    fn label_sort_both_directions() {
        let p = SortSpec::asc(SortBy::Label).apply(&pivot(), SortOn::Index).unwrap();
        assert_eq!(idx(&p), ["a", "b", "c"]);
        let p = SortSpec::desc(SortBy::Label).apply(&pivot(), SortOn::Index).unwrap();
        assert_eq!(idx(&p), ["c", "b", "a"]);
    }

    #[test]
    fn value_sort_is_stable_for_ties() {
        let p = SortSpec::desc(SortBy::Value).apply(&pivot(), SortOn::Index).unwrap();
        assert_eq!(idx(&p), ["b", "c", "a"]);
        let p = SortSpec::asc(SortBy::Value).apply(&pivot(), SortOn::Index).unwrap();
        assert_eq!(idx(&p), ["a", "b", "c"]);
    }

    #[test]
    fn value_sort_on_columns_moves_cells() {
        let p = SortSpec::desc(SortBy::Value).apply(&pivot(), SortOn::Columns).unwrap();
        assert_eq!(p.columns, vec![Label::from("x"), Label::from("y")]);
        assert_eq!(p.row(0), &[Some(3.0), Some(2.0)]);
    }

    #[test]
    fn explicit_reorders_and_drops() {
        let p = SortSpec::explicit(["c", "a"]).apply(&pivot(), SortOn::Index).unwrap();
        assert_eq!(idx(&p), ["c", "a"]);
        let err = SortSpec::explicit(["z"]).apply(&pivot(), SortOn::Index).unwrap_err();
        assert!(matches!(err, Error::UnknownLabels { axis: "index", .. }));
    }

    #[test]
    fn parses_specs() {
        assert_eq!("desc:value".parse::<SortSpec>().unwrap(), SortSpec::desc(SortBy::Value));
        assert_eq!(
            "b, 2".parse::<SortSpec>().unwrap(),
            SortSpec::Explicit(vec![Label::from("b"), Label::Int(2)])
        );
        assert!(matches!(" ".parse::<SortSpec>(), Err(Error::InvalidSortSpec(_))));
    }
}
