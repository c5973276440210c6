use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use wave_core::Control;

/// Controls keyed by the frame they fire on.
#[derive(Debug, Default)]
pub struct Schedule {
    by_frame: BTreeMap<usize, Vec<Control>>,
}

impl Schedule {
    /// Parses `frame:action` pairs separated by commas, e.g.
    /// `"10:impulse,200:speed+,400:reset"`. Empty entries are skipped.
    pub fn parse(s: &str) -> Result<Schedule> {
        let mut by_frame: BTreeMap<usize, Vec<Control>> = BTreeMap::new();
        for part in s.split(',') {
            let p = part.trim();
            if p.is_empty() {
                continue;
            }
            let Some((frame, action)) = p.split_once(':') else {
                bail!("control entry {p:?} is not of the form frame:action");
            };
            let frame: usize = frame
                .trim()
                .parse()
                .with_context(|| format!("bad frame in control entry {p:?}"))?;
            let control: Control = action.parse()?;
            by_frame.entry(frame).or_default().push(control);
        }
        Ok(Schedule { by_frame })
    }

    pub fn at(&self, frame: usize) -> &[Control] {
        self.by_frame.get(&frame).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_frame.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_controls_by_frame() {
        let s = Schedule::parse("10:impulse, 10:speed+ ,400:reset,").unwrap();
        assert_eq!(s.at(10), &[Control::Impulse, Control::SpeedUp]);
        assert_eq!(s.at(400), &[Control::Reset]);
        assert!(s.at(11).is_empty());
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn empty_input_is_empty_schedule() {
        assert_eq!(Schedule::parse("").unwrap().len(), 0);
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(Schedule::parse("impulse").is_err());
        assert!(Schedule::parse("x:impulse").is_err());
        assert!(Schedule::parse("3:jump").is_err());
    }
}
