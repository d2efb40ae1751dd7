//! Years to scrape, from the positional arguments.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: u16,
    pub end: u16,
}

impl YearRange {
    /// One year, or an inclusive `start end` pair.
    pub fn from_args(years: &[u16]) -> Result<Self, String> {
        match *years {
            [year] => Ok(YearRange {
                start: year,
                end: year,
            }),
            [start, end] if start <= end => Ok(YearRange { start, end }),
            [start, end] => Err(format!(
                "Start year {} is after end year {}. Usage: patro <start> <end>",
                start, end
            )),
            _ => Err("Expected a year or a start and end year".to_string()),
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_year_is_its_own_range() {
        let range = YearRange::from_args(&[2081]).unwrap();
        assert_eq!(range, YearRange { start: 2081, end: 2081 });
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn pair_is_inclusive() {
        let range = YearRange::from_args(&[2080, 2083]).unwrap();
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn reversed_pair_is_rejected() {
        let err = YearRange::from_args(&[2083, 2080]).unwrap_err();
        assert!(err.contains("2083"));
    }

    #[test]
    fn empty_is_rejected() {
        assert!(YearRange::from_args(&[]).is_err());
    }
}
