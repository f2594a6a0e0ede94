//! Terminal rendering of lookup states.

use chrono::{Local, NaiveDate};
use std::io::{self, Write};

use weather_now_core::{DisplayRecord, LookupState, Presenter};

/// Writes results to one stream and loading/error lines to another.
pub struct TerminalPresenter {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl TerminalPresenter {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self { out, err }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    fn write(&mut self, state: &LookupState) -> io::Result<()> {
        let panels = state.panels();

        if panels.loading {
            writeln!(self.err, "Fetching weather...")?;
        }
        if let Some(message) = panels.error {
            writeln!(self.err, "{message}")?;
        }
        if let Some(record) = panels.result {
            let today = Local::now().date_naive();
            write!(self.out, "{}", format_record(record, today))?;
            self.out.flush()?;
        }
        Ok(())
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, state: &LookupState) {
        if let Err(e) = self.write(state) {
            tracing::error!("Failed to write to terminal: {}", e);
        }
    }
}

pub fn format_record(record: &DisplayRecord, date: NaiveDate) -> String {
    let info = record.weather_info();
    format!(
        "{place}\n\
         {date}\n\
         \n\
         {temperature}°C  {description} [{icon}]\n\
         \n\
         Visibility   {visibility} km\n\
         Humidity     {humidity}%\n\
         Wind         {wind} km/h\n\
         Feels like   {feels_like}°C\n",
        place = record.place_label(),
        date = date.format("%A, %B %-d, %Y"),
        temperature = record.temperature,
        description = info.description,
        icon = info.icon,
        visibility = record.visibility_km,
        humidity = record.humidity_percent,
        wind = record.wind_speed_kmh(),
        feels_like = record.feels_like,
    )
}
