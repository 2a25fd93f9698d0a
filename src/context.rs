// src/context.rs
//
// Explicit application context. One owner for the table, sort state,
// credentials and analysis handle; both the GUI and the CLI drive it.

use std::{
    path::PathBuf,
    sync::Arc,
    thread::JoinHandle,
};

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc, Weekday};

use crate::{
    analysis::{self, AnalysisError, AnalysisService, Analyzer, GeminiClient},
    config::{consts::CSV_MIME, options::{AnalysisOptions, AppOptions}},
    credentials::{CredentialError, CredentialStore},
    csv::{self, CsvError},
    extract::{self, PlayerRecord, Schema},
    file,
    goals::{self, Status},
    sort::{self, SortOutcome, SortState},
    table::{self, WarTable},
};

/// Builds the analyzer once a key is known. Swappable so tests never hit the network.
pub type AnalyzerFactory =
    Box<dyn Fn(&str, &AnalysisOptions) -> Result<Arc<dyn Analyzer>, AnalysisError> + Send + Sync>;

fn gemini_factory() -> AnalyzerFactory {
    Box::new(|key: &str, opts: &AnalysisOptions| Ok(Arc::new(GeminiClient::new(key, opts)?) as Arc<dyn Analyzer>))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    NotReady,
    Ready,
}

pub struct AppContext {
    pub table: WarTable,
    pub schema: Schema,
    pub sort_state: SortState,
    pub analysis: AnalysisService,
    pub options: AppOptions,

    credentials: Box<dyn CredentialStore>,
    env_key: Option<String>,
    factory: AnalyzerFactory,
    analyzer: Option<Arc<dyn Analyzer>>,
    worker: Option<JoinHandle<()>>,

    /// Pins the goal weekday (CLI `--day`); otherwise today's local date decides.
    pub day_override: Option<Weekday>,
}

impl AppContext {
    pub fn new(credentials: Box<dyn CredentialStore>, options: AppOptions) -> Self {
        Self {
            table: WarTable::default(),
            schema: options.export.schema.unwrap_or(Schema::Full),
            sort_state: SortState::default(),
            analysis: AnalysisService::new(),
            options,
            credentials,
            env_key: None,
            factory: gemini_factory(),
            analyzer: None,
            worker: None,
            day_override: None,
        }
    }

    /// Key from the environment; wins over the stored one at `init`.
    pub fn with_env_key(mut self, key: Option<String>) -> Self {
        self.env_key = key;
        self
    }

    pub fn with_analyzer_factory(mut self, factory: AnalyzerFactory) -> Self {
        self.factory = factory;
        self
    }

    /* ---------- lifecycle ---------- */

    /// Load the credential and build the analyzer. Never fails: problems leave us NotReady.
    pub fn init(&mut self) -> Readiness {
        self.analyzer = None;

        let key = match self.env_key.clone() {
            Some(k) => {
                logd!("Init: using API key from environment");
                Some(k)
            }
            None => match self.credentials.load() {
                Ok(k) => k,
                Err(e) => {
                    loge!("Init: credential load failed: {}", e);
                    None
                }
            },
        };

        if let Some(key) = key {
            match (self.factory)(&key, &self.options.analysis) {
                Ok(a) => self.analyzer = Some(a),
                Err(e) => loge!("Init: analyzer setup failed: {}", e),
            }
        }

        let r = self.readiness();
        logf!("Init: {:?}", r);
        r
    }

    pub fn readiness(&self) -> Readiness {
        if self.analyzer.is_some() { Readiness::Ready } else { Readiness::NotReady }
    }

    pub fn save_api_key(&mut self, key: &str) -> Result<Readiness, CredentialError> {
        self.credentials.save(key)?;
        // A freshly saved key replaces any environment key for this session
        self.env_key = None;
        Ok(self.init())
    }

    pub fn clear_api_key(&mut self) -> Result<Readiness, CredentialError> {
        self.credentials.clear()?;
        self.env_key = None;
        Ok(self.init())
    }

    /* ---------- table ---------- */

    pub fn load_table(&mut self, source: &str) -> Result<usize, Box<dyn std::error::Error>> {
        let t = table::load(source)?;
        self.set_table(t);
        Ok(self.table.nrows())
    }

    pub fn set_table(&mut self, t: WarTable) {
        self.schema = self.options.export.schema.unwrap_or_else(|| Schema::detect(&t));
        self.sort_state = SortState::from_table(&t);
        self.table = t;
        self.analysis.reset();
        logd!("Context: table set (schema={:?}, rows={})", self.schema, self.table.nrows());
    }

    /// Fresh extraction on every call; the table may have been re-sorted since.
    pub fn records(&self) -> Vec<PlayerRecord> {
        extract::extract(&self.table, self.schema)
    }

    /// Header click: toggle direction for `key` and reorder rows.
    pub fn sort_by(&mut self, key: &str) -> SortOutcome {
        if self.table.column_index(key).is_none() {
            return sort::sort_by_column(&mut self.table, key, sort::Direction::Ascending);
        }
        let dir = self.sort_state.click(key);
        sort::sort_by_column(&mut self.table, key, dir)
    }

    /* ---------- export ---------- */

    pub fn csv_text(&self) -> Result<String, CsvError> {
        csv::to_csv(&self.records(), self.schema.header_labels(), self.schema)
    }

    /// Write already formatted CSV text into the export directory.
    pub fn write_csv(&self, text: &str, date: NaiveDate) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = file::write_export(self.options.export.out_dir(), date, text)?;
        logf!("Export: wrote {} ({})", path.display(), CSV_MIME);
        Ok(path)
    }

    /// Filename date: the UTC calendar day of `now`, whatever its zone.
    pub fn export_date_at<Tz: TimeZone>(now: DateTime<Tz>) -> NaiveDate {
        now.with_timezone(&Utc).date_naive()
    }

    pub fn export_date() -> NaiveDate {
        Self::export_date_at(Utc::now())
    }

    /* ---------- analysis ---------- */

    /// Local calendar day; decides the weekday goal.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn goal(&self) -> u32 {
        match self.day_override {
            Some(day) => goals::daily_goal(day),
            None => goals::goal_for_date(Self::today()),
        }
    }

    /// Players per status against today's goal, from the deck counts.
    pub fn status_counts(&self) -> Vec<(Status, usize)> {
        let goal = self.goal();
        let records = self.records();
        [Status::Critical, Status::Warning, Status::Ok]
            .into_iter()
            .map(|st| (st, records.iter().filter(|r| goals::classify(r.decks(), goal) == st).count()))
            .collect()
    }

    /// Preconditions, in order: key, then data. Neither failure touches the network.
    fn prepare_analysis(&self) -> Result<(Arc<dyn Analyzer>, String), AnalysisError> {
        let checked = match &self.analyzer {
            None => Err(AnalysisError::MissingCredential),
            Some(a) => {
                let records = self.records();
                if records.is_empty() {
                    Err(AnalysisError::NothingToAnalyze)
                } else {
                    Ok((Arc::clone(a), analysis::build_prompt(&records, self.schema, self.goal())))
                }
            }
        };
        if let Err(e) = &checked {
            logd!("Analysis: refused ({})", e);
            self.analysis.reject(e);
        }
        checked
    }

    /// Start the request on a worker thread. The pending guard moves with it.
    pub fn start_analysis(&mut self) -> Result<(), AnalysisError> {
        if self.analysis.is_pending() {
            return Err(AnalysisError::Busy);
        }
        let (analyzer, prompt) = self.prepare_analysis()?;
        let guard = self.analysis.begin()?;

        logf!("Analysis: started (prompt {} chars)", prompt.chars().count());
        self.worker = Some(std::thread::spawn(move || {
            let result = analyzer.generate(&prompt);
            guard.finish(&result);
        }));
        Ok(())
    }

    /// Same request, on the calling thread.
    pub fn analyze_blocking(&self) -> Result<String, AnalysisError> {
        if self.analysis.is_pending() {
            return Err(AnalysisError::Busy);
        }
        let (analyzer, prompt) = self.prepare_analysis()?;
        self.analysis.run(analyzer.as_ref(), &prompt)
    }

    /// Join the last worker, if any.
    pub fn wait_analysis(&mut self) {
        if let Some(h) = self.worker.take() {
            if h.join().is_err() {
                loge!("Analysis: worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryStore;

    struct Never;
    impl Analyzer for Never {
        fn generate(&self, _: &str) -> Result<String, AnalysisError> {
            Ok(s!("never"))
        }
    }

    fn ctx(key: Option<&str>) -> AppContext {
        let store = match key {
            Some(k) => MemoryStore::with_key(k),
            None => MemoryStore::default(),
        };
        AppContext::new(Box::new(store), AppOptions::default())
            .with_analyzer_factory(Box::new(|_: &str, _: &AnalysisOptions| Ok(Arc::new(Never) as Arc<dyn Analyzer>)))
    }

    #[test]
    fn readiness_follows_credentials() {
        let mut c = ctx(None);
        assert_eq!(c.init(), Readiness::NotReady);
        assert!(c.save_api_key("   ").is_err());
        assert_eq!(c.save_api_key("abc").unwrap(), Readiness::Ready);
        assert_eq!(c.clear_api_key().unwrap(), Readiness::NotReady);
    }

    #[test]
    fn env_key_wins_until_a_save() {
        let mut c = ctx(None).with_env_key(Some(s!("from-env")));
        assert_eq!(c.init(), Readiness::Ready);
        assert_eq!(c.clear_api_key().unwrap(), Readiness::NotReady);
    }

    #[test]
    fn status_counts_use_deck_numbers() {
        use crate::table::Cell;
        let mut c = ctx(None);
        c.day_override = Some(Weekday::Fri);
        let rows = [("Ana", "8"), ("Bia", "4"), ("Caio", "1")]
            .into_iter()
            .map(|(n, d)| vec![Cell::new(n), Cell::new(d), Cell::new("x")])
            .collect();
        c.set_table(WarTable::from_rows(Vec::new(), rows));
        assert_eq!(
            c.status_counts(),
            vec![(Status::Critical, 1), (Status::Warning, 1), (Status::Ok, 1)]
        );
    }

    #[test]
    fn export_date_is_the_utc_day() {
        use chrono::FixedOffset;
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let late = brt.with_ymd_and_hms(2026, 10, 18, 22, 30, 0).unwrap();
        let date = AppContext::export_date_at(late);
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(file::export_filename(date), "relatorio_guerra_2026-10-19.csv");

        let morning = brt.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        assert_eq!(AppContext::export_date_at(morning), NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    }

    #[test]
    fn goal_uses_day_override() {
        let mut c = ctx(None);
        c.day_override = Some(Weekday::Fri);
        assert_eq!(c.goal(), 8);
    }
}
