//! Parsed request definitions keyed by catalog key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CatalogError, DispatchError};
use crate::events::{EventSink, ReplayEvent};
use crate::parser::{DefinitionKind, DefinitionParser};
use crate::request::RequestModel;

/// Read-only map from catalog key to its parsed [`RequestModel`].
#[derive(Debug, Clone, Default)]
pub struct RequestCatalog {
    entries: BTreeMap<String, Arc<RequestModel>>,
}

impl RequestCatalog {
    /// Reads and parses every definition file in `sources`.
    ///
    /// Each file is parsed with the grammar chosen by its extension and tagged
    /// with its key. All files are attempted so every broken definition is
    /// reported, then the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when any file cannot be read or parsed.
    pub fn load(
        sources: &BTreeMap<String, PathBuf>,
        events: &EventSink,
    ) -> Result<Self, CatalogError> {
        let parser = DefinitionParser::new(events.clone());
        let mut catalog = Self::default();
        let mut first_error: Option<CatalogError> = None;

        for (key, path) in sources {
            match load_definition(&parser, key, path) {
                Ok((kind, model)) => {
                    events.emit(ReplayEvent::DefinitionParsed {
                        key: key.clone(),
                        kind,
                    });
                    catalog.insert(key.clone(), model);
                }
                Err(err) => {
                    events.emit(ReplayEvent::DefinitionFailed {
                        key: key.clone(),
                        path: path.clone(),
                        error: err.to_string(),
                    });
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(catalog),
        }
    }

    /// Adds a model under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: String, model: RequestModel) {
        self.entries.insert(key, Arc::new(model));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<RequestModel>> {
        self.entries.get(key)
    }

    /// Resolves keys into models, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownRequestKey`] for the first key that is
    /// not in the catalog.
    pub fn resolve<S>(&self, keys: &[S]) -> Result<Vec<Arc<RequestModel>>, DispatchError>
    where
        S: AsRef<str>,
    {
        keys.iter()
            .map(|key| {
                let key = key.as_ref();
                self.get(key)
                    .cloned()
                    .ok_or_else(|| DispatchError::UnknownRequestKey {
                        key: key.to_owned(),
                    })
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn load_definition(
    parser: &DefinitionParser,
    key: &str,
    path: &Path,
) -> Result<(DefinitionKind, RequestModel), CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|err| CatalogError::ReadDefinition {
        key: key.to_owned(),
        path: path.to_path_buf(),
        source: err,
    })?;
    let kind = DefinitionKind::from_path(path);
    let text = match kind {
        DefinitionKind::Curl => text.trim(),
        DefinitionKind::RawHttp => text.as_str(),
    };
    let model = parser
        .parse(kind, text, key)
        .map_err(|err| CatalogError::ParseDefinition {
            key: key.to_owned(),
            path: path.to_path_buf(),
            source: err,
        })?;
    Ok((kind, model))
}
