use std::collections::BTreeMap;

use crate::dataset::EscrowRecord;

/// Raw label to record count. Keys are used exactly as they appear in the
/// data; no case or whitespace normalisation.
pub type Distribution = BTreeMap<String, usize>;

/// Group-by-count over `County`.
pub fn county_distribution(records: &[EscrowRecord]) -> Distribution {
    count_by(records, |r| &r.county)
}

/// Group-by-count over `Last Interaction Type`.
pub fn interaction_types(records: &[EscrowRecord]) -> Distribution {
    count_by(records, |r| &r.last_interaction_type)
}

/// Entries ordered by count descending, ties broken by label.
pub fn ranked(distribution: &Distribution) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = distribution
        .iter()
        .map(|(k, v)| (k.clone(), *v))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

fn count_by<F>(records: &[EscrowRecord], key: F) -> Distribution
where
    F: Fn(&EscrowRecord) -> &String,
{
    let mut acc = Distribution::new();
    for record in records {
        *acc.entry(key(record).clone()).or_insert(0) += 1;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(county: &str, channel: &str) -> EscrowRecord {
        EscrowRecord {
            county: county.into(),
            last_interaction_type: channel.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_use_raw_keys() {
        let records = vec![
            record("Dallas", "Call"),
            record("dallas", "Call"),
            record("Dallas ", "Email"),
            record("Dallas", "Chat"),
        ];
        let counties = county_distribution(&records);
        assert_eq!(counties.len(), 3);
        assert_eq!(counties["Dallas"], 2);
        assert_eq!(counties["dallas"], 1);
        assert_eq!(counties["Dallas "], 1);

        let channels = interaction_types(&records);
        assert_eq!(channels["Call"], 2);
    }

    #[test]
    fn test_ranked_orders_by_count_then_label() {
        let records = vec![
            record("Travis", "Call"),
            record("Harris", "Call"),
            record("Travis", "Call"),
            record("Collin", "Call"),
        ];
        let ranking = ranked(&county_distribution(&records));
        assert_eq!(
            ranking,
            vec![
                ("Travis".to_string(), 2),
                ("Collin".to_string(), 1),
                ("Harris".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(county_distribution(&[]).is_empty());
        assert!(ranked(&Distribution::new()).is_empty());
    }
}
