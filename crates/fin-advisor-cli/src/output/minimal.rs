use serde_json::Value;

use super::{result_section, scalar_text};

/// The headline figure of each command, in the order they are tried.
const PRIORITY_KEYS: [&str; 12] = [
    "recommended",
    "error",
    "primary_scenario",
    "question_type",
    "future_value",
    "emi",
    "monthly_sip",
    "monthly_sip_required",
    "years",
    "future_cost",
    "next_payment_due",
    "future_price",
];

/// Print just the key answer from the output, searching nested results.
pub fn print_minimal(value: &Value) {
    let result = result_section(value);

    for key in PRIORITY_KEYS {
        if let Some(found) = find_key(result, key) {
            println!("{}", scalar_text(found));
            return;
        }
    }

    if let Value::Object(map) = result {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }
    println!("{}", scalar_text(result));
}

/// Breadth-first search for a non-null `key` in nested objects.
fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let mut queue = vec![value];
    while !queue.is_empty() {
        let mut next = Vec::new();
        for v in queue {
            if let Value::Object(map) = v {
                if let Some(found) = map.get(key).filter(|f| !f.is_null()) {
                    return Some(found);
                }
                next.extend(map.values().filter(|c| c.is_object()));
            }
        }
        queue = next;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_key_prefers_shallow_match() {
        let v = json!({"a": {"years": "3"}, "years": "5"});
        assert_eq!(find_key(&v, "years"), Some(&json!("5")));
        let v = json!({"comparison": {"recommended": "OLD"}});
        assert_eq!(find_key(&v, "recommended"), Some(&json!("OLD")));
        assert_eq!(find_key(&v, "missing"), None);
    }
}
