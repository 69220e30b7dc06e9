//! Contrast VIF result structures.

/// Variance inflation of a single contrast.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastVif {
    /// Contrast label as supplied by the caller.
    pub name: String,

    /// Ratio `true_variance / best_variance`. 1.0 means the contrast is
    /// unaffected by correlation between regressors.
    pub vif: f64,

    /// `cᵗ (XᵗX)⁻¹ c` under the observed regressor correlations.
    pub true_variance: f64,

    /// `cᵗ D⁻¹ c` with all between-regressor correlations set to zero.
    pub best_variance: f64,
}

/// VIFs for a set of contrasts, in the order the contrasts were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastVifs {
    entries: Vec<ContrastVif>,
    retained_columns: Vec<String>,
    dropped_columns: Vec<String>,
}

impl ContrastVifs {
    pub(crate) fn new(
        entries: Vec<ContrastVif>,
        retained_columns: Vec<String>,
        dropped_columns: Vec<String>,
    ) -> Self {
        Self {
            entries,
            retained_columns,
            dropped_columns,
        }
    }

    /// VIF of the named contrast.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entry(name).map(|e| e.vif)
    }

    /// Full record of the named contrast.
    pub fn entry(&self, name: &str) -> Option<&ContrastVif> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// All records in input order.
    pub fn entries(&self) -> &[ContrastVif] {
        &self.entries
    }

    /// `(name, vif)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|e| (e.name.as_str(), e.vif))
    }

    /// Contrast names in input order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// VIF values in input order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.vif).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Design columns the contrast vectors were aligned to.
    pub fn retained_columns(&self) -> &[String] {
        &self.retained_columns
    }

    /// Design columns removed as constant before estimation.
    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped_columns
    }

    /// Names of contrasts whose VIF exceeds `threshold`, in input order.
    ///
    /// Common thresholds are 5 or 10.
    pub fn high_vif_contrasts(&self, threshold: f64) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.vif > threshold)
            .map(|e| e.name.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ContrastVifs {
    type Item = &'a ContrastVif;
    type IntoIter = std::slice::Iter<'a, ContrastVif>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
