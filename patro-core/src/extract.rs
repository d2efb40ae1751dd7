//! HTML month page → [`MonthRecord`].
//!
//! Every field has its own lookup and a fixed default for when the element
//! is missing, so a partial page still produces a record. html5ever recovers
//! from any malformed markup, so extraction itself cannot fail; the only
//! error source is compiling the selectors in [`Extractor::new`].

use scraper::{ElementRef, Html, Selector};

use crate::error::{PatroError, PatroResult};
use crate::model::{DayRecord, Metadata, MonthRecord};

/// Gregorian month heading. Default: `""`.
const EN_HEADING: &str = "#entarikYr";
/// Bikram Sambat month heading. Default: `""`.
const NP_HEADING: &str = "#yren";

/// Holiday and festival list; its first `<b>` title and first `<a>` link are
/// dropped. Default: empty.
const HOLIDAYS: (&str, &[&str]) = ("#holi", &["b", "a"]);
/// Marriage dates; first `<b>` title dropped. Default: empty.
const MARRIAGE: (&str, &[&str]) = ("#bibah", &["b"]);
/// Bratabandha dates; first `<b>` title dropped. Default: empty.
const BRATABANDHA: (&str, &[&str]) = ("#bratabandha", &["b"]);

const DAY_CELL: &str = ".cells";
const NEPALI_DAY: &str = "#nday";
const ENGLISH_DAY: &str = "#eday";
const TITHI: &str = "#dashi";
const FESTIVAL: &str = "#fest";
/// `<font color="red">` inside the day number marks a public holiday.
const HOLIDAY_MARKER: &str = "#nday font";
const HOLIDAY_COLOR: &str = "red";

const WEEK_LEN: usize = 7;

fn selector(css: &str) -> PatroResult<Selector> {
    Selector::parse(css).map_err(|e| PatroError::Parse(format!("invalid selector '{css}': {e}")))
}

struct ListField {
    container: Selector,
    strip: Vec<Selector>,
}

impl ListField {
    fn new((container, strip): (&str, &[&str])) -> PatroResult<Self> {
        Ok(ListField {
            container: selector(container)?,
            strip: strip.iter().map(|css| selector(css)).collect::<PatroResult<_>>()?,
        })
    }

    /// Text of the container minus the stripped elements, one entry per
    /// non-blank line.
    fn extract(&self, document: &Html) -> Vec<String> {
        let Some(container) = document.select(&self.container).next() else {
            return Vec::new();
        };

        // Only the first match of each strip selector is removed, in order;
        // matches inside an element already removed no longer count.
        let mut skipped = Vec::new();
        for sel in &self.strip {
            let target = container.select(sel).find(|el| {
                !skipped.contains(&el.id()) && !el.ancestors().any(|a| skipped.contains(&a.id()))
            });
            if let Some(el) = target {
                skipped.push(el.id());
            }
        }

        let mut text = String::new();
        for node in container.descendants() {
            let Some(fragment) = node.value().as_text() else {
                continue;
            };
            if node.ancestors().any(|a| skipped.contains(&a.id())) {
                continue;
            }
            text.push_str(fragment);
        }

        text.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Compiled selectors for one calendar page layout.
pub struct Extractor {
    en_heading: Selector,
    np_heading: Selector,
    holidays: ListField,
    marriage: ListField,
    bratabandha: ListField,
    day_cell: Selector,
    nepali_day: Selector,
    english_day: Selector,
    tithi: Selector,
    festival: Selector,
    holiday_marker: Selector,
}

impl Extractor {
    pub fn new() -> PatroResult<Self> {
        Ok(Extractor {
            en_heading: selector(EN_HEADING)?,
            np_heading: selector(NP_HEADING)?,
            holidays: ListField::new(HOLIDAYS)?,
            marriage: ListField::new(MARRIAGE)?,
            bratabandha: ListField::new(BRATABANDHA)?,
            day_cell: selector(DAY_CELL)?,
            nepali_day: selector(NEPALI_DAY)?,
            english_day: selector(ENGLISH_DAY)?,
            tithi: selector(TITHI)?,
            festival: selector(FESTIVAL)?,
            holiday_marker: selector(HOLIDAY_MARKER)?,
        })
    }

    pub fn extract(&self, html: &str) -> MonthRecord {
        let document = Html::parse_document(html);

        MonthRecord {
            metadata: self.metadata(&document),
            days: self.days(&document),
            holidays_and_festivals: self.holidays.extract(&document),
            marriage_dates: self.marriage.extract(&document),
            coming_of_age_dates: self.bratabandha.extract(&document),
        }
    }

    fn metadata(&self, document: &Html) -> Metadata {
        Metadata {
            en: first_text(document.root_element(), &self.en_heading),
            np: first_text(document.root_element(), &self.np_heading),
        }
    }

    fn days(&self, document: &Html) -> Vec<DayRecord> {
        document
            .select(&self.day_cell)
            .enumerate()
            .map(|(i, cell)| self.day(i, cell))
            .collect()
    }

    fn day(&self, index: usize, cell: ElementRef<'_>) -> DayRecord {
        DayRecord {
            slot: (index % WEEK_LEN + 1) as u8,
            nepali_day: first_text(cell, &self.nepali_day),
            english_day: first_text(cell, &self.english_day),
            tithi: first_text(cell, &self.tithi),
            festival: first_text(cell, &self.festival),
            is_holiday: self.is_holiday(cell),
        }
    }

    /// False when the marker or its `color` attribute is missing.
    fn is_holiday(&self, cell: ElementRef<'_>) -> bool {
        cell.select(&self.holiday_marker)
            .next()
            .and_then(|font| font.value().attr("color"))
            .is_some_and(|color| color.eq_ignore_ascii_case(HOLIDAY_COLOR))
    }
}

/// Trimmed text fragments of the first match, concatenated. `""` if absent.
fn first_text(scope: ElementRef<'_>, sel: &Selector) -> String {
    scope
        .select(sel)
        .next()
        .map(|el| {
            el.text()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(nday: &str, color: Option<&str>, eday: &str, tithi: &str, fest: &str) -> String {
        let number = match color {
            Some(c) => format!(r#"<font color="{c}">{nday}</font>"#),
            None => nday.to_string(),
        };
        format!(
            r#"<div class="cells">
                <span id="fest">{fest}</span>
                <span id="nday">{number}</span>
                <span id="eday">{eday}</span>
                <span id="dashi">{tithi}</span>
            </div>"#
        )
    }

    fn page(cells: &[String]) -> String {
        format!(
            r#"<html><body>
            <div id="yren"> बैशाख २०८१ </div>
            <div id="entarikYr">Apr/May <i>2024</i></div>
            <div id="holi"><b>बिदा तथा चाडपर्व</b>
                १ नयाँ वर्ष
                <a href="/more">थप</a>
                ११ लोकतन्त्र दिवस

                १ नयाँ वर्ष
            </div>
            <div id="bibah"><b>विवाह मुहूर्त</b>
                ४, ५, ६
                १२, १३
            </div>
            <div id="bratabandha"><b>ब्रतबन्ध मुहूर्त</b>
                ७, २१
            </div>
            <div class="grid">{}</div>
            </body></html>"#,
            cells.concat()
        )
    }

    fn extractor() -> Extractor {
        Extractor::new().unwrap()
    }

    #[test]
    fn reads_metadata_headings() {
        let month = extractor().extract(&page(&[]));

        assert_eq!(month.metadata.np, "बैशाख २०८१");
        assert_eq!(month.metadata.en, "Apr/May2024");
    }

    #[test]
    fn lists_drop_titles_and_blank_lines() {
        let month = extractor().extract(&page(&[]));

        assert_eq!(
            month.holidays_and_festivals,
            vec!["१ नयाँ वर्ष", "११ लोकतन्त्र दिवस", "१ नयाँ वर्ष"]
        );
        assert_eq!(month.marriage_dates, vec!["४, ५, ६", "१२, १३"]);
        assert_eq!(month.coming_of_age_dates, vec!["७, २१"]);
    }

    #[test]
    fn only_first_title_is_stripped() {
        let html = r#"<div id="bibah"><b>Title</b>
            1, 2
            <b>3</b>
        </div>"#;
        let month = extractor().extract(html);

        assert_eq!(month.marriage_dates, vec!["1, 2", "3"]);
    }

    #[test]
    fn link_inside_stripped_title_does_not_spare_the_next_link() {
        let html = "<div id=\"holi\"><b>Title <a>x</a></b>\nfoo\n<a>more</a>\nbar</div>";
        let month = extractor().extract(html);

        assert_eq!(month.holidays_and_festivals, vec!["foo", "bar"]);
    }

    #[test]
    fn slots_cycle_through_the_week() {
        let cells: Vec<String> = (1..=10)
            .map(|i| cell(&i.to_string(), None, "", "", ""))
            .collect();
        let month = extractor().extract(&page(&cells));

        let slots: Vec<u8> = month.days.iter().map(|d| d.slot).collect();
        assert_eq!(slots, vec![1, 2, 3, 4, 5, 6, 7, 1, 2, 3]);
        assert_eq!(month.days[9].nepali_day, "10");
    }

    #[test]
    fn holiday_flag_requires_red_marker() {
        let cells = vec![
            cell("१", Some("red"), "14", "प्रतिपदा", "नयाँ वर्ष"),
            cell("२", Some("RED"), "15", "द्वितीया", ""),
            cell("३", Some("blue"), "16", "तृतीया", ""),
            cell("४", None, "17", "चतुर्थी", ""),
        ];
        let month = extractor().extract(&page(&cells));

        let flags: Vec<bool> = month.days.iter().map(|d| d.is_holiday).collect();
        assert_eq!(flags, vec![true, true, false, false]);
    }

    #[test]
    fn day_fields_are_read_per_cell() {
        let cells = vec![cell("१", Some("red"), " 14 ", "प्रतिपदा", "नयाँ वर्ष")];
        let month = extractor().extract(&page(&cells));

        assert_eq!(
            month.days,
            vec![DayRecord {
                slot: 1,
                nepali_day: "१".into(),
                english_day: "14".into(),
                tithi: "प्रतिपदा".into(),
                festival: "नयाँ वर्ष".into(),
                is_holiday: true,
            }]
        );
    }

    #[test]
    fn missing_elements_fall_back_to_defaults() {
        let html = r#"<html><body>
            <div class="cells"><span id="nday">५</span></div>
            <div class="cells"></div>
        </body></html>"#;
        let month = extractor().extract(html);

        assert_eq!(month.metadata, Metadata::default());
        assert!(month.holidays_and_festivals.is_empty());
        assert!(month.marriage_dates.is_empty());
        assert_eq!(month.days.len(), 2);
        assert_eq!(month.days[0].nepali_day, "५");
        assert_eq!(month.days[0].tithi, "");
        assert!(!month.days[1].is_holiday);
        assert_eq!(month.days[1].slot, 2);
    }

    #[test]
    fn garbage_input_yields_empty_record() {
        let month = extractor().extract("<<<not really </html");
        assert_eq!(month, MonthRecord::default());
    }
}
