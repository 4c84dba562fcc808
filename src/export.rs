use crate::error::{Result, ScrapeError};
use crate::results::{CSV_SCHEMA, Product};
use std::path::{Path, PathBuf};

/// A category's products and the name its file is written under
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTarget {
    pub name: String,
    pub products: Vec<Product>,
}

impl ExportTarget {
    pub fn new(name: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            name: name.into(),
            products,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

/// Writes `<dir>/<name>.csv` for every target, in order.
///
/// Existing files are overwritten. The first failure stops the export; files
/// written before it are left in place.
pub fn export_all(dir: &Path, targets: &[ExportTarget]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(targets.len());
    for target in targets {
        let path = dir.join(target.file_name());
        write_products(&path, &target.products)?;
        ::log::info!("Wrote {} products to {}", target.products.len(), path.display());

        let rows = read_products(&path)?.len();
        if rows != target.products.len() {
            ::log::warn!(
                "{} reads back {} rows, expected {}",
                path.display(),
                rows,
                target.products.len()
            );
        } else {
            ::log::debug!("Verified {} rows in {}", rows, path.display());
        }
        written.push(path);
    }
    Ok(written)
}

/// Writes the header row and one row per product
pub fn write_products(path: &Path, products: &[Product]) -> Result<()> {
    let csv_error = |source| ScrapeError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Header is written by hand so an empty category still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;

    writer.write_record(CSV_SCHEMA).map_err(csv_error)?;
    for product in products {
        writer.serialize(product).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads back a file written by [`write_products`]
pub fn read_products(path: &Path) -> Result<Vec<Product>> {
    let csv_error = |source| ScrapeError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    reader
        .deserialize()
        .map(|row| row.map_err(csv_error))
        .collect()
}
