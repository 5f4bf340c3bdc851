use std::fmt::{Display, Formatter};

use num_bigint::BigUint;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::config::{Settings, Verbosity};
use crate::dp::Driver;
use crate::tables::RowTables;
use crate::verify::{Tally, Verifier};

/// Reasons a count may fail to run.
#[derive(Debug)]
pub enum CountFailure {
    /// The worker pool could not be started.
    ThreadPool(ThreadPoolBuildError),
}

impl Display for CountFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ThreadPool(err) => write!(f, "could not start worker threads: {}", err),
        }
    }
}

impl std::error::Error for CountFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ThreadPool(err) => Some(err),
        }
    }
}

impl From<ThreadPoolBuildError> for CountFailure {
    fn from(value: ThreadPoolBuildError) -> Self {
        Self::ThreadPool(value)
    }
}

/// Settings together with the row tables built for them.
///
/// A [`Census`] should be built using a [`CensusBuilder`](crate::builder::CensusBuilder).
/// It is read-only once built; [`count`](Self::count) and [`verify`](Self::verify) may be called
/// any number of times and share its tables.
pub struct Census {
    pub(crate) settings: Settings,
    pub(crate) tables: RowTables,
}

impl Census {
    pub(crate) fn new(settings: Settings) -> Self {
        let tables = RowTables::new(settings.width(), settings.symmetry);
        if settings.reports(Verbosity::Rounds) {
            eprintln!(
                "[Census] size {}: {} rows, {} middle rows",
                settings.width(),
                tables.universe().len(),
                tables.middle_rows().len(),
            );
        }
        Self { settings, tables }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tables(&self) -> &RowTables {
        &self.tables
    }

    pub(crate) fn pool(&self) -> Result<ThreadPool, CountFailure> {
        Ok(ThreadPoolBuilder::new().num_threads(self.settings.threads).build()?)
    }

    /// A seeded counter that has not taken any steps yet; see [`Driver::advance`].
    pub fn driver(&self) -> Result<Driver<'_>, CountFailure> {
        Ok(Driver::new(self, self.pool()?))
    }

    /// Count the boards by dynamic programming over rows.
    pub fn count(&self) -> Result<BigUint, CountFailure> {
        let mut driver = self.driver()?;
        driver.run();
        if self.settings.reports(Verbosity::Boards) {
            for board in driver.counted().filter_map(|(state, _)| state.board.as_deref()) {
                eprintln!("[Census] board\n{}\n", board);
            }
        }
        Ok(driver.total())
    }

    /// Count the boards again by exhaustive search. Only practical for small boards.
    pub fn verify(&self) -> Result<Tally, CountFailure> {
        Ok(Verifier::new(self, self.pool()?).run())
    }
}
