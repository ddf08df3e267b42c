use smol_str::SmolStr;

/// Knobs for one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Report rate-law names that have no value
    pub check_rate_laws: bool,
    /// Joins prefix and counter in generated names (`k_1`)
    pub unique_name_separator: SmolStr,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            check_rate_laws: true,
            unique_name_separator: SmolStr::new_static("_"),
        }
    }
}
