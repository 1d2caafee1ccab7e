use std::path::Path;
use std::sync::Arc;

use crate::charts::{chart_data, ChartData, ChartSettings};
use crate::data::filter::{apply_filters, FilterInput};
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::error::SessionError;
use crate::info::DataInfo;
use crate::recommend::{recommend, RecommendationRules, Recommendations};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
///
/// Lifecycle: no dataset until the first successful load; each later
/// successful load swaps in a new `Arc<Dataset>` wholesale. Failed loads
/// and rejected filter input leave everything as it was.
pub struct AppState {
    /// Loaded dataset (None until the user loads a file).
    pub dataset: Option<Arc<Dataset>>,

    /// Filter fields as currently typed.
    pub filter_input: FilterInput,

    /// Rows currently shown in the table (last successful filter result).
    pub view: Option<Arc<Dataset>>,

    /// Chart data for `view`; `None` when the view is empty.
    pub charts: Option<ChartData>,

    /// Sorted category labels of the loaded dataset, for the selector.
    pub categories: Vec<String>,

    /// Status line text.
    pub status_message: String,

    pub chart_settings: ChartSettings,
    pub rules: RecommendationRules,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filter_input: FilterInput::default(),
            view: None,
            charts: None,
            categories: Vec::new(),
            status_message: "Ready".to_string(),
            chart_settings: ChartSettings::default(),
            rules: RecommendationRules::default(),
        }
    }
}

impl AppState {
    /// Load `path`, replacing the current dataset on success.
    ///
    /// Returns the number of records loaded.
    pub fn load_from(&mut self, path: &Path) -> Result<usize, SessionError> {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with columns {:?}",
                    dataset.len(),
                    dataset.schema().column_names()
                );
                let n = dataset.len();
                self.set_dataset(dataset);
                Ok(n)
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                Err(e.into())
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let dataset = Arc::new(dataset);
        self.categories = dataset.categories();
        self.filter_input = FilterInput::default();
        self.status_message = format!("Data loaded. Records: {}", dataset.len());
        self.show(Arc::clone(&dataset));
        self.dataset = Some(dataset);
    }

    /// Parse the filter fields and apply them to the loaded dataset.
    ///
    /// On any invalid field nothing changes: view, charts and status keep
    /// their previous values. Returns the number of matching records.
    pub fn apply_filters(&mut self) -> Result<usize, SessionError> {
        let dataset = self.loaded()?;
        let spec = self.filter_input.parse().map_err(|e| {
            log::warn!("Rejected filter input: {e}");
            e
        })?;

        let view = apply_filters(&dataset, &spec);
        let n = view.len();
        log::info!("Filter {spec:?} matched {n} of {} records", dataset.len());

        self.status_message = format!("Records found: {n}");
        self.show(Arc::new(view));
        Ok(n)
    }

    /// Descriptive report over the whole loaded dataset.
    pub fn data_info(&self) -> Result<DataInfo, SessionError> {
        let dataset = self.loaded()?;
        Ok(DataInfo::from_dataset(&dataset))
    }

    /// Recommendations over the whole loaded dataset.
    pub fn recommendations(&self) -> Result<Recommendations, SessionError> {
        let dataset = self.loaded()?;
        Ok(recommend(&dataset, &self.rules))
    }

    /// Number of rows in the current view.
    pub fn visible_count(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.len())
    }

    fn loaded(&self) -> Result<Arc<Dataset>, SessionError> {
        self.dataset.clone().ok_or(SessionError::NotLoaded)
    }

    fn show(&mut self, view: Arc<Dataset>) {
        self.charts = chart_data(&view, &self.chart_settings);
        self.view = Some(view);
    }
}
