//! Student records and populations.

/// Identifier of a student. Positive and unique within a population.
pub type StudentId = u64;

/// One scored student with ranked category preferences.
///
/// `preferences[k]` holds the rank `k + 1` choice. Slots may be empty for
/// imported records with sparse ranks; generated records fill every slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudentRecord {
    /// Student identifier.
    pub id: StudentId,
    /// Merit score; higher is processed first.
    pub score: f64,
    /// Ranked preferences, rank 1 first.
    pub preferences: Vec<Option<String>>,
}

impl StudentRecord {
    /// Creates a record whose preferences occupy consecutive ranks.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_allocsim::population::StudentRecord;
    ///
    /// let s = StudentRecord::new(1, 8.5, ["Software", "Mechanical"]);
    /// assert_eq!(s.declared_preferences().collect::<Vec<_>>(), ["Software", "Mechanical"]);
    /// ```
    pub fn new<I, S>(id: StudentId, score: f64, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            score,
            preferences: preferences.into_iter().map(|p| Some(p.into())).collect(),
        }
    }

    /// Creates a record from rank slots that may contain gaps.
    pub fn with_ranked(id: StudentId, score: f64, preferences: Vec<Option<String>>) -> Self {
        Self {
            id,
            score,
            preferences,
        }
    }

    /// Non-empty preferences in rank order.
    pub fn declared_preferences(&self) -> impl Iterator<Item = &str> {
        self.preferences.iter().filter_map(|p| p.as_deref())
    }
}

/// A collection of student records.
///
/// Generated populations arrive sorted by score descending; imported ones
/// keep file order until [`sort_by_score`](Population::sort_by_score) is called.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    records: Vec<StudentRecord>,
}

impl Population {
    /// Wraps records as-is.
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    /// Stable sort by score descending; equal scores keep their relative order.
    pub fn sort_by_score(&mut self) {
        self.records.sort_by(|a, b| b.score.total_cmp(&a.score));
    }

    /// Records in current order.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Consumes the population, returning its records.
    pub fn into_records(self) -> Vec<StudentRecord> {
        self.records
    }

    /// Looks up a record by id.
    pub fn get(&self, id: StudentId) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in current order.
    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
