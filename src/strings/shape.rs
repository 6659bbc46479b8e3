//! Shape-preserving application of per-string functions.
//!
//! A scalar maps to a scalar, a slice or vector to a vector, and a [`Column`]
//! to a column of the same name with missing entries left missing.

use crate::error::TidyError;

/// An input that a per-string function can be mapped over.
pub trait StrShape {
    /// The same shape holding `T` instead of strings.
    type Out<T>;

    fn map_str<T, F>(&self, f: F) -> Self::Out<T>
    where
        F: FnMut(&str) -> T;

    /// Map a fallible function, stopping at the first error.
    fn try_map_str<T, E, F>(&self, f: F) -> Result<Self::Out<T>, E>
    where
        F: FnMut(&str) -> Result<T, E>;
}

impl StrShape for str {
    type Out<T> = T;

    fn map_str<T, F>(&self, mut f: F) -> T
    where
        F: FnMut(&str) -> T,
    {
        f(self)
    }

    fn try_map_str<T, E, F>(&self, mut f: F) -> Result<T, E>
    where
        F: FnMut(&str) -> Result<T, E>,
    {
        f(self)
    }
}

impl StrShape for String {
    type Out<T> = T;

    fn map_str<T, F>(&self, mut f: F) -> T
    where
        F: FnMut(&str) -> T,
    {
        f(self)
    }

    fn try_map_str<T, E, F>(&self, mut f: F) -> Result<T, E>
    where
        F: FnMut(&str) -> Result<T, E>,
    {
        f(self)
    }
}

impl<S: AsRef<str>> StrShape for [S] {
    type Out<T> = Vec<T>;

    fn map_str<T, F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(&str) -> T,
    {
        self.iter().map(|s| f(s.as_ref())).collect()
    }

    fn try_map_str<T, E, F>(&self, mut f: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&str) -> Result<T, E>,
    {
        self.iter().map(|s| f(s.as_ref())).collect()
    }
}

impl<S: AsRef<str>, const N: usize> StrShape for [S; N] {
    type Out<T> = Vec<T>;

    fn map_str<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(&str) -> T,
    {
        self.as_slice().map_str(f)
    }

    fn try_map_str<T, E, F>(&self, f: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&str) -> Result<T, E>,
    {
        self.as_slice().try_map_str(f)
    }
}

impl<S: AsRef<str>> StrShape for Vec<S> {
    type Out<T> = Vec<T>;

    fn map_str<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(&str) -> T,
    {
        self.as_slice().map_str(f)
    }

    fn try_map_str<T, E, F>(&self, f: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&str) -> Result<T, E>,
    {
        self.as_slice().try_map_str(f)
    }
}

impl<S: AsRef<str>> StrShape for Column<S> {
    type Out<T> = Column<T>;

    fn map_str<T, F>(&self, mut f: F) -> Column<T>
    where
        F: FnMut(&str) -> T,
    {
        Column {
            name: self.name.clone(),
            values: self
                .values
                .iter()
                .map(|value| value.as_ref().map(|s| f(s.as_ref())))
                .collect(),
        }
    }

    fn try_map_str<T, E, F>(&self, mut f: F) -> Result<Column<T>, E>
    where
        F: FnMut(&str) -> Result<T, E>,
    {
        Ok(Column {
            name: self.name.clone(),
            values: self
                .values
                .iter()
                .map(|value| value.as_ref().map(|s| f(s.as_ref())).transpose())
                .collect::<Result<_, E>>()?,
        })
    }
}

/// A named column of optional values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<T = String> {
    name: String,
    values: Vec<Option<T>>,
}

impl<T> Column<T> {
    pub fn new(name: impl Into<String>, values: Vec<Option<T>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// A column without missing entries.
    pub fn from_values<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        Self::new(name, values.into_iter().map(|v| Some(v.into())).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<T>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<T>> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&T> {
        self.values.get(row).and_then(Option::as_ref)
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Named string columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, replacing any column with the same name.
    pub fn with_column(mut self, column: Column<String>) -> Result<Self, TidyError> {
        self.insert(column)?;
        Ok(self)
    }

    pub fn insert(&mut self, column: Column<String>) -> Result<(), TidyError> {
        if let Some(first) = self.columns.first()
            && first.len() != column.len()
        {
            return Err(TidyError::LengthMismatch {
                expected: first.len(),
                actual: column.len(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&Column<String>> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column<String>] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Look up several columns, failing on the first unknown name.
    pub fn select(&self, names: &[&str]) -> Result<Vec<&Column<String>>, TidyError> {
        names
            .iter()
            .map(|name| {
                self.column(name)
                    .ok_or_else(|| TidyError::UnknownColumn((*name).to_string()))
            })
            .collect()
    }

    /// Replace each named column with `f` applied to it.
    ///
    /// Every new column is computed before any is swapped in, so a failure
    /// leaves the table untouched. A name listed twice is mapped twice.
    pub fn map_columns<F>(&mut self, names: &[&str], mut f: F) -> Result<(), TidyError>
    where
        F: FnMut(&Column<String>) -> Result<Column<String>, TidyError>,
    {
        self.select(names)?;
        let mut staged: Vec<(usize, Column<String>)> = Vec::with_capacity(names.len());
        for name in names {
            let Some(position) = self.columns.iter().position(|c| c.name == *name) else {
                continue;
            };
            let current = staged
                .iter()
                .rev()
                .find(|(staged_at, _)| *staged_at == position)
                .map_or(&self.columns[position], |(_, column)| column);
            let expected = current.len();
            let updated = f(current)?;
            if updated.len() != expected {
                return Err(TidyError::LengthMismatch {
                    expected,
                    actual: updated.len(),
                });
            }
            staged.push((position, updated.rename(*name)));
        }

        for (position, column) in staged {
            self.columns[position] = column;
        }
        Ok(())
    }

    /// Join the named columns row by row with `sep`.
    pub fn concat(&self, names: &[&str], sep: &str) -> Result<Column<String>, TidyError> {
        let columns = self.select(names)?;
        super::modify::concat_columns(&columns, sep)
    }
}
