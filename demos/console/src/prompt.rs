//! Line-oriented operator prompts.
//!
//! Generic over the reader and writer so a scripted session can be fed in
//! from a byte slice.

use std::io::{self, BufRead, Write};

use er_core::{GeoPoint, Incident, Severity};

pub struct Prompter<R, W> {
    input:  R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Collect incidents until the operator answers `0` or input ends.
    pub fn read_incidents(&mut self) -> io::Result<Vec<Incident>> {
        let mut incidents = Vec::new();
        while let Some(incident) = self.read_incident()? {
            incidents.push(incident);
            write!(self.output, "Any Other Assistance Required: 1/0    ")?;
            self.output.flush()?;
            let Some(answer) = self.read_line()? else { break };
            // Anything that is not a non-zero number ends the session.
            if answer.trim().parse::<i64>().map_or(true, |n| n == 0) {
                break;
            }
        }
        Ok(incidents)
    }

    /// One incident.  An invalid severity code restarts from the place
    /// prompt; `None` means input ended.
    fn read_incident(&mut self) -> io::Result<Option<Incident>> {
        loop {
            write!(self.output, "Enter the place: ")?;
            self.output.flush()?;
            let Some(place) = self.read_line()? else { return Ok(None) };
            writeln!(self.output, "Entered place: {place}")?;

            writeln!(self.output, "Enter Emergency: ")?;
            for severity in Severity::ALL {
                writeln!(self.output, "{}. {}", severity.rank(), severity.label())?;
            }
            self.output.flush()?;
            let Some(code) = self.read_line()? else { return Ok(None) };
            let severity = match code.trim().parse::<u8>().ok().map(Severity::from_code) {
                Some(Ok(severity)) => severity,
                _ => {
                    writeln!(self.output, "Enter valid code!!!!")?;
                    continue;
                }
            };

            let Some(location) = self.read_location()? else { return Ok(None) };
            return Ok(Some(Incident::new(place, severity, location)));
        }
    }

    fn read_location(&mut self) -> io::Result<Option<GeoPoint>> {
        loop {
            write!(self.output, "\nEnter the coordinates: ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else { return Ok(None) };
            match parse_coordinates(&line) {
                Some(point) => return Ok(Some(point)),
                None => writeln!(self.output, "Enter latitude and longitude, e.g. 28.6300 77.2170")?,
            }
        }
    }

    /// Next line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// `"<lat> <lon>"`, whitespace or comma separated.
pub fn parse_coordinates(line: &str) -> Option<GeoPoint> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty());
    let lat: f64 = parts.next()?.parse().ok()?;
    let lon: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    Some(GeoPoint::new(lat, lon))
}
