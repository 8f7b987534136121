//! Plain text grid dumps: one line per row, each cell right aligned in a
//! fixed width field with four decimals. Two dumps are the same iff every
//! corresponding value compares equal.

use crate::error::*;
use crate::grid::*;
use std::io::prelude::*;

pub const DEFAULT_FIELD_WIDTH: usize = 13;
pub const DUMP_PRECISION: usize = 4;

pub fn write_dump<W: Write>(
    grid: &Grid,
    output: &mut W,
    field_width: usize,
) -> std::io::Result<()> {
    for row in grid.rows() {
        for v in row {
            write!(
                output,
                "{:>width$.prec$}",
                v,
                width = field_width,
                prec = DUMP_PRECISION
            )?;
        }
        writeln!(output)?;
    }
    Ok(())
}

pub fn save_dump<P: AsRef<std::path::Path>>(
    grid: &Grid,
    path: &P,
    field_width: usize,
) -> DumpResult<()> {
    log::info!("Writing: {:?}", path.as_ref());
    let mut output = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_dump(grid, &mut output, field_width)?;
    output.flush()?;
    Ok(())
}

/// Parse whitespace separated values, one row per non-blank line.
pub fn read_dump<R: BufRead>(input: R) -> DumpResult<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (l, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| DumpError::Parse {
                    line: l + 1,
                    token: token.to_owned(),
                })
            })
            .collect::<DumpResult<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn load_dump<P: AsRef<std::path::Path>>(
    path: &P,
) -> DumpResult<Vec<Vec<f64>>> {
    let input = std::io::BufReader::new(std::fs::File::open(path)?);
    read_dump(input)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Comparison {
    Identical,
    RowCountMismatch {
        left: usize,
        right: usize,
    },
    RowLengthMismatch {
        row: usize,
        left: usize,
        right: usize,
    },
    /// First differing cell in row-major order.
    ValueMismatch {
        row: usize,
        col: usize,
        left: f64,
        right: f64,
    },
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        *self == Comparison::Identical
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        match self {
            Comparison::Identical => write!(f, "matrices are identical"),
            Comparison::RowCountMismatch { left, right } => {
                write!(f, "matrices differ: {left} rows vs {right} rows")
            }
            Comparison::RowLengthMismatch { row, left, right } => write!(
                f,
                "matrices differ: row {row} has {left} values vs {right} values"
            ),
            Comparison::ValueMismatch {
                row,
                col,
                left,
                right,
            } => write!(
                f,
                "matrices differ: ({row}, {col}) is {left} vs {right}"
            ),
        }
    }
}

pub fn compare_dumps(left: &[Vec<f64>], right: &[Vec<f64>]) -> Comparison {
    if left.len() != right.len() {
        return Comparison::RowCountMismatch {
            left: left.len(),
            right: right.len(),
        };
    }
    for (row, (l_row, r_row)) in left.iter().zip(right).enumerate() {
        if l_row.len() != r_row.len() {
            return Comparison::RowLengthMismatch {
                row,
                left: l_row.len(),
                right: r_row.len(),
            };
        }
        for (col, (l, r)) in l_row.iter().zip(r_row).enumerate() {
            if l != r {
                return Comparison::ValueMismatch {
                    row,
                    col,
                    left: *l,
                    right: *r,
                };
            }
        }
    }
    Comparison::Identical
}

/// Print a small grid to stdout, space separated.
pub fn print_grid(grid: &Grid) {
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v}")).collect();
        println!("{}", line.join(" "));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn small_grid() -> Grid {
        Grid::from_rows(&[
            vec![10.0, 15.0, 20.0],
            vec![15.0, 18.75, 25.0],
            vec![20.0, -25.0, 30.123456],
        ])
        .unwrap()
    }

    #[test]
    fn fixed_width_format() {
        let mut output = Vec::new();
        write_dump(&small_grid(), &mut output, 10).unwrap();
        let text = String::from_utf8(output).unwrap();
        let expected = concat!(
            "   10.0000   15.0000   20.0000\n",
            "   15.0000   18.7500   25.0000\n",
            "   20.0000  -25.0000   30.1235\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn default_width_lines() {
        let mut output = Vec::new();
        write_dump(&small_grid(), &mut output, DEFAULT_FIELD_WIDTH).unwrap();
        let text = String::from_utf8(output).unwrap();
        for line in text.lines() {
            assert_eq!(line.len(), 3 * DEFAULT_FIELD_WIDTH);
        }
    }

    #[test]
    fn read_back() {
        let mut output = Vec::new();
        write_dump(&small_grid(), &mut output, 10).unwrap();
        let rows = read_dump(output.as_slice()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![15.0, 18.75, 25.0]);
        assert_eq!(rows[2][2], 30.1235);
    }

    #[test]
    fn read_skips_blank_lines() {
        let text = "1 2\n\n   \n3 4\n";
        let rows = read_dump(text.as_bytes()).unwrap();
        assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn read_reports_bad_token() {
        let text = "1.0 2.0\n3.0 x4\n";
        match read_dump(text.as_bytes()) {
            Err(DumpError::Parse { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "x4");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn compare() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert!(compare_dumps(&a, &a.clone()).is_identical());

        let mut b = a.clone();
        b[1][0] = 3.5;
        assert_eq!(
            compare_dumps(&a, &b),
            Comparison::ValueMismatch {
                row: 1,
                col: 0,
                left: 3.0,
                right: 3.5
            }
        );

        assert_eq!(
            compare_dumps(&a, &a[..1]),
            Comparison::RowCountMismatch { left: 2, right: 1 }
        );

        let c = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            compare_dumps(&a, &c),
            Comparison::RowLengthMismatch {
                row: 1,
                left: 2,
                right: 1
            }
        );
    }

    #[test]
    fn fractional_differences_are_seen() {
        let a = vec![vec![0.1250]];
        let b = vec![vec![0.1251]];
        assert!(!compare_dumps(&a, &b).is_identical());
    }
}
