//! CloudFormation logical resource names derived from record sets.

/// Route 53 reports a `*` label as this octal escape.
const WILDCARD_ESCAPE: &str = r"\052";

/// Characters which may appear in a DNS name but not in a logical ID.
const STRIPPED: [char; 3] = ['.', '_', '-'];

/// Derive the logical resource name for a record set.
///
/// The name is title-cased label by label, the wildcard escape becomes `Star`,
/// punctuation is removed, and the record type is appended so that record sets
/// of different types at the same name stay apart.
///
/// ```
/// use route53_cloudformation::template::resource_name;
///
/// assert_eq!(resource_name(r"\052.example.com.", "A"), "StarExampleComA");
/// ```
pub fn resource_name(name: &str, record_type: &str) -> String {
    let mut derived = title_case(name)
        .replace(WILDCARD_ESCAPE, "Star")
        .replace(&STRIPPED[..], "");
    derived.push_str(record_type);
    derived
}

/// Upper-case every cased character that follows an uncased one, and lower-case
/// the rest, so each run of letters starts with a capital.
fn title_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut previous_cased = false;

    for c in input.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && !previous_cased {
            output.extend(c.to_uppercase());
        } else if cased {
            output.extend(c.to_lowercase());
        } else {
            output.push(c);
        }
        previous_cased = cased;
    }

    output
}
