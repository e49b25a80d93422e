use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use common::{ExchangeBucket, Instrument};

/// Display name used when a code is missing from the universe snapshot.
const UNKNOWN_NAME: &str = "unknown";

/// Venue for a code, by prefix. Most specific first: STAR (`68`) is
/// carved out ahead of the generic Shanghai `60` range, and ChiNext
/// (`30`) stays in the Shenzhen bucket.
pub fn bucket_for(code: &str) -> Option<ExchangeBucket> {
    if code.starts_with("68") {
        Some(ExchangeBucket::Star)
    } else if code.starts_with("60") {
        Some(ExchangeBucket::Shanghai)
    } else if code.starts_with("00") || code.starts_with("30") {
        Some(ExchangeBucket::Shenzhen)
    } else if code.starts_with('8') {
        Some(ExchangeBucket::Beijing)
    } else {
        None
    }
}

/// Partition `codes` into venue buckets as `"code (name)"` entries.
///
/// All four buckets are present in the output; entries ascend by code. A
/// code matching no venue rule is dropped.
pub fn classify(
    codes: &BTreeSet<String>,
    universe: &[Instrument],
) -> BTreeMap<ExchangeBucket, Vec<String>> {
    let names: HashMap<&str, &str> = universe
        .iter()
        .map(|i| (i.code.as_str(), i.name.as_str()))
        .collect();

    let mut buckets: BTreeMap<ExchangeBucket, Vec<String>> =
        ExchangeBucket::ALL.iter().map(|&b| (b, Vec::new())).collect();

    for code in codes {
        let Some(bucket) = bucket_for(code) else {
            debug!(code = %code, "Code matches no venue rule, dropping");
            continue;
        };
        let name = names.get(code.as_str()).copied().unwrap_or(UNKNOWN_NAME);
        buckets.entry(bucket).or_default().push(format!("{code} ({name})"));
    }

    buckets
}

/// Render a classification as an alert body, one line per venue.
pub fn format_classification(buckets: &BTreeMap<ExchangeBucket, Vec<String>>) -> String {
    buckets
        .iter()
        .map(|(bucket, entries)| {
            if entries.is_empty() {
                format!("{bucket}: -")
            } else {
                format!("{bucket}: {}", entries.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn universe() -> Vec<Instrument> {
        vec![
            Instrument::new("600519", "Kweichow Moutai"),
            Instrument::new("000001", "Ping An Bank"),
            Instrument::new("300750", "CATL"),
            Instrument::new("830799", "Ailit"),
            Instrument::new("688981", "SMIC"),
        ]
    }

    #[test]
    fn fixed_codes_map_to_their_venues() {
        assert_eq!(bucket_for("600519"), Some(ExchangeBucket::Shanghai));
        assert_eq!(bucket_for("000001"), Some(ExchangeBucket::Shenzhen));
        assert_eq!(bucket_for("300750"), Some(ExchangeBucket::Shenzhen));
        assert_eq!(bucket_for("830799"), Some(ExchangeBucket::Beijing));
        assert_eq!(bucket_for("688981"), Some(ExchangeBucket::Star));
    }

    #[test]
    fn buckets_are_mutually_exclusive() {
        let buckets = classify(
            &codes(&["600519", "000001", "300750", "830799", "688981"]),
            &universe(),
        );

        let all: Vec<&String> = buckets.values().flatten().collect();
        assert_eq!(all.len(), 5);
        let unique: BTreeSet<&String> = all.iter().copied().collect();
        assert_eq!(unique.len(), 5);

        assert_eq!(buckets[&ExchangeBucket::Shanghai], vec!["600519 (Kweichow Moutai)"]);
        assert_eq!(
            buckets[&ExchangeBucket::Shenzhen],
            vec!["000001 (Ping An Bank)", "300750 (CATL)"]
        );
        assert_eq!(buckets[&ExchangeBucket::Beijing], vec!["830799 (Ailit)"]);
        assert_eq!(buckets[&ExchangeBucket::Star], vec!["688981 (SMIC)"]);
    }

    #[test]
    fn code_missing_from_the_universe_gets_a_placeholder_name() {
        let buckets = classify(&codes(&["601398"]), &universe());
        assert_eq!(buckets[&ExchangeBucket::Shanghai], vec!["601398 (unknown)"]);
    }

    #[test]
    fn unrecognized_prefix_is_dropped() {
        let buckets = classify(&codes(&["123456", "600519"]), &universe());
        let all: Vec<&String> = buckets.values().flatten().collect();
        assert_eq!(all.len(), 1);
        assert_eq!(buckets[&ExchangeBucket::Shanghai], vec!["600519 (Kweichow Moutai)"]);
    }

    #[test]
    fn all_buckets_are_present_even_when_empty() {
        let buckets = classify(&codes(&[]), &universe());
        assert_eq!(buckets.len(), 4);
        assert!(buckets.values().all(Vec::is_empty));
    }

    #[test]
    fn entries_ascend_by_code_within_a_bucket() {
        let buckets = classify(&codes(&["300750", "000001", "002594"]), &universe());
        let shenzhen = &buckets[&ExchangeBucket::Shenzhen];
        assert_eq!(
            shenzhen,
            &vec!["000001 (Ping An Bank)", "002594 (unknown)", "300750 (CATL)"]
        );
    }

    #[test]
    fn formatted_output_covers_every_bucket() {
        let buckets = classify(&codes(&["600519"]), &universe());
        let text = format_classification(&buckets);
        assert!(text.contains("Shanghai Main Board: 600519 (Kweichow Moutai)"));
        assert!(text.contains("Shenzhen / ChiNext: -"));
        assert!(text.contains("Beijing Stock Exchange: -"));
        assert!(text.contains("STAR Market: -"));
    }
}
