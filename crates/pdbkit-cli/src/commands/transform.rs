use super::require_file;
use crate::cli::{RottransArgs, UpdateXyzArgs};
use crate::error::{CliError, Result};
use nalgebra::{Matrix3, Vector3};
use pdbkit::core::transform;
use tracing::info;

pub fn update_xyz(args: &UpdateXyzArgs) -> Result<()> {
    require_file(&args.old)?;
    require_file(&args.new)?;
    let output = transform::update_xyz_from_file(&args.old, &args.new, args.output.as_deref())?;
    println!("✓ Wrote {}", output.display());
    Ok(())
}

pub fn rottrans(args: &RottransArgs) -> Result<()> {
    require_file(&args.moving)?;
    let output = args.output.as_deref();

    let written = match (&args.transform.matrix, &args.transform.rotation) {
        (Some(table), _) => {
            info!("Applying transform table {:?}", table);
            transform::rottrans(&args.moving, table, output)?
        }
        (None, Some(rotation)) => {
            let rotation = Matrix3::from_row_slice(rotation);
            let translation = Vector3::from(args.translation.unwrap_or([0.0; 3]));
            info!("Applying inline rotation {} and translation {}", rotation, translation);
            transform::rottrans_from_matrix(&args.moving, &rotation, &translation, output)?
        }
        (None, None) => {
            return Err(CliError::Argument(
                "Either --matrix or --rotation must be given".to_string(),
            ));
        }
    };

    println!("✓ Wrote {}", written.display());
    Ok(())
}
