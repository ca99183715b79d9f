//! Fetch command handler.
//!
//! Downloads filings for one company across one or more form types and
//! converts the textual primary documents to JSON filing records. Each form
//! type is an independent unit of work: a failure is logged and the loop
//! moves on, so partial completion is expected rather than fatal.

use chrono::NaiveDate;
use clap::Args;
use edgar_core::{config::AppConfig, AppError, AppResult};
use edgar_filings::{CompanyId, Portfolio};

/// Download filings for a company and convert them to JSON records
#[derive(Args, Debug)]
pub struct FetchCommand {
    /// Ticker symbol (e.g. CSCO)
    #[arg(long, conflicts_with = "cik")]
    pub ticker: Option<String>,

    /// Central Index Key (e.g. 0001804591)
    #[arg(long)]
    pub cik: Option<String>,

    /// Form types to download (comma-separated, e.g. "10-K,10-Q,8-K")
    #[arg(long, default_value = "10-K", value_delimiter = ',')]
    pub forms: Vec<String>,

    /// Start of the filing-date range, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// End of the filing-date range, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Portfolio directory name under the workspace
    #[arg(long, default_value = "filings")]
    pub portfolio: String,

    /// Download only; skip converting documents to JSON
    #[arg(long)]
    pub no_convert: bool,
}

impl FetchCommand {
    /// Execute the fetch command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing fetch command");
        tracing::debug!("Fetch options: {:?}", self);

        config.validate_sec()?;
        let user_agent = config.sec_user_agent.clone().unwrap_or_default();

        let company = self.company()?;
        let date_range = self.date_range()?;

        let portfolio_dir = config.workspace.join(&self.portfolio);
        let mut portfolio = Portfolio::open(&portfolio_dir, &user_agent)?;

        for form in &self.forms {
            println!("\n--- Downloading {} for {} ---", form, company.label());

            match self
                .fetch_form(&mut portfolio, form, &company, date_range)
                .await
            {
                Ok(converted) => {
                    println!("{}: {} document(s) converted", form, converted);
                }
                Err(e) => {
                    tracing::warn!(form = %form, error = %e, "Skipping form after error");
                    println!("Skipped {} for {} due to error: {}", form, company.label(), e);
                }
            }
        }

        println!("\nDone. JSON files are under {}", portfolio_dir.display());
        Ok(())
    }

    /// Download one form type and convert its documents. Returns the number
    /// of documents converted to JSON.
    async fn fetch_form(
        &self,
        portfolio: &mut Portfolio,
        form: &str,
        company: &CompanyId,
        date_range: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<usize> {
        let documents = portfolio
            .download_submissions(form, company, date_range)
            .await?;

        if self.no_convert {
            return Ok(0);
        }

        let mut converted = 0;
        for document in &documents {
            if !document.is_convertible() {
                tracing::debug!(path = %document.path.display(), "Not a textual document; skipping");
                continue;
            }

            println!("got path: {}", document.path.display());
            let record = document.parse()?;
            let outpath = document.write_json(&record)?;
            println!("outpath: {}", outpath.display());
            converted += 1;
        }

        Ok(converted)
    }

    fn company(&self) -> AppResult<CompanyId> {
        match (&self.cik, &self.ticker) {
            (Some(cik), _) => Ok(CompanyId::Cik(cik.clone())),
            (None, Some(ticker)) => Ok(CompanyId::Ticker(ticker.clone())),
            (None, None) => Err(AppError::Config(
                "Provide a company via --ticker or --cik".to_string(),
            )),
        }
    }

    fn date_range(&self) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => {
                if from > to {
                    return Err(AppError::Config(format!(
                        "--from {} is after --to {}",
                        from, to
                    )));
                }
                Ok(Some((from, to)))
            }
            _ => Ok(None),
        }
    }
}
