use super::error::TransformError;
use super::xyz::update_xyz;
use crate::core::records::layout::COORDINATE_WIDTH;
use crate::core::records::scanner::read_pdb;
use nalgebra::{Matrix3, Point3, Vector3};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How a transformed coordinate is rendered into its 8-column field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateStyle {
    /// Standard `%8.3f`: right-aligned, wider values overflow the field.
    RightAligned,
    /// `%-8.3f` cut to exactly eight characters. Wider values lose trailing digits
    /// but the columns after the block never shift.
    LeftTruncated,
}

impl CoordinateStyle {
    pub fn format_value(self, value: f64) -> String {
        match self {
            CoordinateStyle::RightAligned => format!("{:8.3}", value),
            CoordinateStyle::LeftTruncated => {
                let mut field = format!("{:<8.3}", value);
                field.truncate(COORDINATE_WIDTH);
                field
            }
        }
    }

    pub fn format_point(self, point: &Point3<f64>) -> String {
        let mut block = String::with_capacity(3 * COORDINATE_WIDTH);
        for value in point.iter() {
            block.push_str(&self.format_value(*value));
        }
        block
    }
}

/// A rotation matrix and translation vector applied to row-vector coordinates:
/// `p' = p·M + t`.
#[derive(Debug, Clone, PartialEq)]
pub struct RotTrans {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl RotTrans {
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    /// Reads a whitespace-delimited transform table.
    ///
    /// The first line is a title and is skipped, as is any row that is not entirely
    /// numeric (column headers). The next three numeric rows each read
    /// `[index] t u0 u1 u2`: `t` is the translation component and `u0..u2` the
    /// matrix row.
    ///
    /// ```text
    /// ------ The rotation matrix to rotate Chain_1 to Chain_2 ------
    /// m               t[m]        u[m][0]        u[m][1]        u[m][2]
    /// 0      12.3456789012   0.9876543210  -0.1234567890   0.0987654321
    /// 1      -4.5678901234   0.1234567890   0.9876543210  -0.0123456789
    /// 2       7.8901234567  -0.0987654321   0.0123456789   0.9951234567
    /// ```
    pub fn from_table(path: impl AsRef<Path>) -> Result<Self, TransformError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TransformError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut rows: Vec<[f64; 4]> = Vec::with_capacity(3);
        for (idx, line) in content.lines().enumerate().skip(1) {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let Ok(values) = tokens
                .iter()
                .map(|t| t.parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
            else {
                debug!("Skipping non-numeric transform table line {}", idx + 1);
                continue;
            };
            let row = match values.as_slice() {
                [_, t, u0, u1, u2] | [t, u0, u1, u2] => [*t, *u0, *u1, *u2],
                _ => {
                    return Err(TransformError::InvalidRow {
                        path: path.to_string_lossy().to_string(),
                        line: idx + 1,
                        found: values.len(),
                    });
                }
            };
            rows.push(row);
            if rows.len() == 3 {
                break;
            }
        }

        if rows.len() < 3 {
            return Err(TransformError::MissingRows {
                path: path.to_string_lossy().to_string(),
                found: rows.len(),
            });
        }

        let translation = Vector3::new(rows[0][0], rows[1][0], rows[2][0]);
        let rotation = Matrix3::new(
            rows[0][1], rows[0][2], rows[0][3], //
            rows[1][1], rows[1][2], rows[1][3], //
            rows[2][1], rows[2][2], rows[2][3],
        );
        Ok(Self::new(rotation, translation))
    }

    /// Maps a single point.
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation.transpose() * point.coords + self.translation)
    }

    /// Transforms every `ATOM` coordinate of `moving` and writes the result.
    pub fn apply_to_file(
        &self,
        moving: impl AsRef<Path>,
        style: CoordinateStyle,
        output: Option<&Path>,
    ) -> Result<PathBuf, TransformError> {
        let moving = moving.as_ref();
        let coords = read_pdb(moving)?;
        debug!("Transforming {} atoms of {:?}", coords.len(), moving);

        let fields = coords
            .iter()
            .map(|p| style.format_point(&self.apply(p)));
        let output = update_xyz(moving, fields, output)?;
        info!("Wrote transformed structure to {:?}", output);
        Ok(output)
    }
}

/// Applies the transform stored in `matrix_file` to `moving`, writing right-aligned
/// `%8.3f` coordinates. Defaults to `<stem>.rottrans.pdb`.
pub fn rottrans(
    moving: impl AsRef<Path>,
    matrix_file: impl AsRef<Path>,
    output: Option<&Path>,
) -> Result<PathBuf, TransformError> {
    RotTrans::from_table(matrix_file)?.apply_to_file(moving, CoordinateStyle::RightAligned, output)
}

/// Applies `p·rotation + translation` to `moving`, writing left-aligned coordinates
/// cut to exactly eight columns each.
pub fn rottrans_from_matrix(
    moving: impl AsRef<Path>,
    rotation: &Matrix3<f64>,
    translation: &Vector3<f64>,
    output: Option<&Path>,
) -> Result<PathBuf, TransformError> {
    RotTrans::new(*rotation, *translation).apply_to_file(
        moving,
        CoordinateStyle::LeftTruncated,
        output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const MOVING: &str = "\
ATOM      1  N   MET A   1       1.000   2.000   3.000  1.00 50.00           N
ATOM      2  CA  MET A   1      38.961 -20.101  26.938  1.00 50.00           C
TER       3      MET A   1
";

    const TABLE: &str = "\
------ The rotation matrix to rotate Chain_1 to Chain_2 ------
m               t[m]        u[m][0]        u[m][1]        u[m][2]
0       1.0000000000   0.0000000000   1.0000000000   0.0000000000
1       2.0000000000  -1.0000000000   0.0000000000   0.0000000000
2       3.0000000000   0.0000000000   0.0000000000   1.0000000000

Code for rotating Structure A from (x,y,z) to (X,Y,Z):
";

    #[test]
    fn format_value_right_aligned_matches_printf() {
        assert_eq!(CoordinateStyle::RightAligned.format_value(1.0), "   1.000");
        assert_eq!(CoordinateStyle::RightAligned.format_value(-20.1014), " -20.101");
    }

    #[test]
    fn format_value_left_truncated_is_always_eight_columns() {
        assert_eq!(CoordinateStyle::LeftTruncated.format_value(1.0), "1.000   ");
        assert_eq!(CoordinateStyle::LeftTruncated.format_value(-20.1014), "-20.101 ");
        assert_eq!(
            CoordinateStyle::LeftTruncated.format_value(-1234.5678),
            "-1234.56"
        );
    }

    #[test]
    fn from_table_reads_translation_and_matrix_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matrix.txt");
        fs::write(&path, TABLE).unwrap();

        let transform = RotTrans::from_table(&path).unwrap();
        assert_eq!(transform.translation, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(
            transform.rotation,
            Matrix3::new(0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn from_table_fails_with_fewer_than_three_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.txt");
        fs::write(&path, "title\nm t u0 u1 u2\n0 1 1 0 0\n").unwrap();

        let result = RotTrans::from_table(&path);
        assert!(matches!(
            result,
            Err(TransformError::MissingRows { found: 1, .. })
        ));
    }

    #[test]
    fn from_table_rejects_rows_with_wrong_arity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.txt");
        fs::write(&path, "title\n0 1 2\n").unwrap();

        let result = RotTrans::from_table(&path);
        assert!(matches!(
            result,
            Err(TransformError::InvalidRow { line: 2, found: 3, .. })
        ));
    }

    #[test]
    fn apply_multiplies_row_vector_then_translates() {
        let transform = RotTrans::new(
            Matrix3::new(0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0),
            Vector3::new(1.0, 2.0, 3.0),
        );
        let moved = transform.apply(&Point3::new(1.0, 2.0, 3.0));
        assert_eq!(moved, Point3::new(-1.0, 3.0, 6.0));
    }

    #[test]
    fn rottrans_writes_transformed_atom_lines() {
        let dir = tempdir().unwrap();
        let moving = dir.path().join("moving.pdb");
        let table = dir.path().join("matrix.txt");
        fs::write(&moving, MOVING).unwrap();
        fs::write(&table, TABLE).unwrap();

        let output = rottrans(&moving, &table, None).unwrap();
        assert_eq!(output, dir.path().join("moving.rottrans.pdb"));

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(&lines[0][30..54], "  -1.000   3.000   6.000");
        assert_eq!(&lines[0][..30], &MOVING.lines().next().unwrap()[..30]);
        assert_eq!(&lines[0][54..], &MOVING.lines().next().unwrap()[54..]);
    }

    #[test]
    fn identity_round_trip_preserves_coordinates() {
        let dir = tempdir().unwrap();
        let moving = dir.path().join("moving.pdb");
        let output = dir.path().join("same.pdb");
        fs::write(&moving, MOVING).unwrap();

        rottrans_from_matrix(
            &moving,
            &Matrix3::identity(),
            &Vector3::zeros(),
            Some(&output),
        )
        .unwrap();

        let before = read_pdb(&moving).unwrap();
        let after = read_pdb(&output).unwrap();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).norm() < 1e-3);
        }

        let content = fs::read_to_string(&output).unwrap();
        let first = content.lines().next().unwrap();
        assert_eq!(&first[30..54], "1.000   2.000   3.000   ");
    }
}
