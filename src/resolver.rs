//! Resource resolution from the `resourceDir` / `resourceName` query parameters.

use crate::case::{is_blank, normalize_dir, normalize_name};
use crate::error::AppError;
use crate::registry::{RegisteredResource, ResourceRegistry};
use crate::resource::QueryParams;

/// Query parameter naming the resource directory.
pub const RESOURCE_DIR_PARAM: &str = "resourceDir";
/// Query parameter naming the resource.
pub const RESOURCE_NAME_PARAM: &str = "resourceName";

const PATH_SEPARATOR: char = '/';

/// Normalized resource selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceSelector {
    /// Lower-cased directory, `None` when absent.
    pub dir: Option<String>,
    /// Capitalized name with hyphens stripped, never empty.
    pub name: String,
}

impl ResourceSelector {
    /// Normalize raw parameter values. Fails with `BadRequest` when the name ends up empty.
    pub fn new(dir: Option<&str>, name: Option<&str>) -> Result<Self, AppError> {
        let dir = dir.map(normalize_dir).filter(|d| !is_blank(d));
        let name = name.map(normalize_name).unwrap_or_default();
        if is_blank(&name) {
            return Err(AppError::BadRequest("Bad Request".into()));
        }
        Ok(Self { dir, name })
    }

    pub fn from_query(query: &QueryParams) -> Result<Self, AppError> {
        Self::new(query.get(RESOURCE_DIR_PARAM), query.get(RESOURCE_NAME_PARAM))
    }

    /// Registry paths to try, in order: `<dir>/<Name>`, then `<dir>/<Name>/<Name>`.
    pub fn candidates(&self) -> [String; 2] {
        let mut base = String::new();
        if let Some(dir) = &self.dir {
            base.push_str(dir);
            base.push(PATH_SEPARATOR);
        }
        base.push_str(&self.name);
        let nested = format!("{}{}{}", base, PATH_SEPARATOR, self.name);
        [base, nested]
    }

    /// Pick the first registered candidate, or fail with `NotImplemented`.
    pub fn resolve<'r>(&self, registry: &'r ResourceRegistry) -> Result<&'r RegisteredResource, AppError> {
        let candidates = self.candidates();
        registry
            .first_of(candidates.iter().map(String::as_str))
            .ok_or_else(|| {
                tracing::debug!(candidates = ?candidates, "no resource registered for candidates");
                AppError::NotImplemented("Resource is absent.".into())
            })
    }
}
