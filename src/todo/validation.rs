//! The create and update rulesets.
//!
//! Both work on the raw [`TodoForm`] and report problems per field, so a
//! rejected submission can be shown again with its errors inline.

use chrono::NaiveDate;

use super::data::*;

const REQUIRED: &str = "This field is required.";
const INVALID_DATE: &str = "Enter a valid date.";
const INVALID_BOOLEAN: &str = "Enter a valid boolean.";

// Format, separator, index of the year part, and its digit count. chrono's
// `%Y` takes any number of digits, so "26-10-21" would read as year 26.
const DATE_FORMATS: [(&str, char, usize, usize); 3] = [
    ("%Y-%m-%d", '-', 0, 4),
    ("%m/%d/%Y", '/', 2, 4),
    ("%m/%d/%y", '/', 2, 2),
];

pub fn validate_create(form: &TodoForm) -> Result<NewTodo, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = clean_title(form.title.as_deref(), &mut errors);
    let description = clean_text(form.description.as_deref());
    let due_date = clean_due_date(form.due_date.as_deref(), &mut errors);

    match (title, due_date) {
        (Some(title), Some(due_date)) if errors.is_empty() => Ok(NewTodo {
            title,
            description,
            due_date,
        }),
        _ => Err(errors),
    }
}

pub fn validate_update(form: &TodoForm) -> Result<TodoChanges, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = match form.title.as_deref() {
        Some(raw) => clean_title(Some(raw), &mut errors),
        None => None,
    };
    let description = form.description.as_deref().map(|raw| clean_text(Some(raw)));
    let due_date = match form.due_date.as_deref() {
        Some(raw) => clean_due_date(Some(raw), &mut errors),
        None => None,
    };
    let resolved = match form.resolved.as_deref() {
        Some(raw) => clean_resolved(raw, &mut errors),
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(TodoChanges {
        title,
        description,
        due_date,
        resolved,
    })
}

fn clean_title(raw: Option<&str>, errors: &mut FieldErrors) -> Option<String> {
    let title = clean_text(raw);

    if title.is_empty() {
        errors.add("title", REQUIRED);
        return None;
    }

    let length = title.chars().count();
    if length > TITLE_MAX_CHARS {
        errors.add(
            "title",
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                TITLE_MAX_CHARS, length
            ),
        );
        return None;
    }

    Some(title)
}

fn clean_text(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or_default().to_string()
}

// The outer `Option` is the validation outcome, the inner one whether a
// date was given at all.
fn clean_due_date(raw: Option<&str>, errors: &mut FieldErrors) -> Option<Option<NaiveDate>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Some(None),
        Some(raw) => raw,
    };

    match parse_date(raw) {
        Some(date) => Some(Some(date)),
        None => {
            errors.add("due_date", INVALID_DATE);
            None
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|&(format, separator, year_at, year_digits)| {
            let year = raw.split(separator).nth(year_at)?;
            if year.len() != year_digits {
                return None;
            }

            NaiveDate::parse_from_str(raw, format).ok()
        })
}

fn clean_resolved(raw: &str, errors: &mut FieldErrors) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Some(true),
        "false" | "off" | "0" | "no" | "" => Some(false),
        _ => {
            errors.add("resolved", INVALID_BOOLEAN);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: Option<&str>, description: Option<&str>, due_date: Option<&str>) -> TodoForm {
        TodoForm {
            title: title.map(String::from),
            description: description.map(String::from),
            due_date: due_date.map(String::from),
            resolved: None,
        }
    }

    #[test]
    fn create_with_title_only() {
        let new = validate_create(&form(Some("Minimal TODO"), None, None)).unwrap();

        assert_eq!(new.title, "Minimal TODO");
        assert_eq!(new.description, "");
        assert_eq!(new.due_date, None);
    }

    #[test]
    fn create_requires_title() {
        let errors = validate_create(&form(None, Some("No title"), None)).unwrap_err();
        assert_eq!(errors.get("title"), Some(&vec![REQUIRED.to_string()]));

        let errors = validate_create(&form(Some("   "), None, None)).unwrap_err();
        assert!(errors.get("title").is_some());
    }

    #[test]
    fn create_trims_text() {
        let new = validate_create(&form(Some("  Buy milk "), Some(" 2 litres\n"), None)).unwrap();
        assert_eq!(new.title, "Buy milk");
        assert_eq!(new.description, "2 litres");
    }

    #[test]
    fn create_rejects_long_title() {
        let long = "x".repeat(TITLE_MAX_CHARS + 1);
        let errors = validate_create(&form(Some(long.as_str()), None, None)).unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some(&vec![
                "Ensure this value has at most 200 characters (it has 201).".to_string()
            ])
        );

        let exact = "x".repeat(TITLE_MAX_CHARS);
        assert!(validate_create(&form(Some(exact.as_str()), None, None)).is_ok());
    }

    #[test]
    fn create_reports_bad_date_on_its_field() {
        let errors = validate_create(&form(Some("Dated"), None, Some("next tuesday"))).unwrap_err();
        assert_eq!(errors.get("due_date"), Some(&vec![INVALID_DATE.to_string()]));
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn create_reports_every_bad_field() {
        let errors = validate_create(&form(None, None, Some("2026-13-40"))).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["due_date", "title"]);
    }

    #[test]
    fn create_accepts_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 21);
        for raw in &["2026-10-21", "10/21/2026", "10/21/26"] {
            let new = validate_create(&form(Some("Dated"), None, Some(*raw))).unwrap();
            assert_eq!(new.due_date, expected, "{}", raw);
        }

        let new = validate_create(&form(Some("Undated"), None, Some(""))).unwrap();
        assert_eq!(new.due_date, None);
    }

    #[test]
    fn dates_need_full_years() {
        for raw in &["26-10-21", "026-10-21", "10/21/026", "10/21/20260"] {
            let errors = validate_create(&form(Some("Dated"), None, Some(*raw))).unwrap_err();
            assert_eq!(errors.get("due_date"), Some(&vec![INVALID_DATE.to_string()]), "{}", raw);
        }

        assert_eq!(parse_date("0999-01-02"), NaiveDate::from_ymd_opt(999, 1, 2));
    }

    #[test]
    fn create_ignores_resolved() {
        let mut submitted = form(Some("Completed TODO"), None, None);
        submitted.resolved = Some("true".to_string());

        let new = validate_create(&submitted).unwrap();
        assert_eq!(new.title, "Completed TODO");
    }

    #[test]
    fn update_leaves_absent_fields() {
        let changes = validate_update(&form(Some("Renamed"), None, None)).unwrap();
        assert_eq!(
            changes,
            TodoChanges {
                title: Some("Renamed".to_string()),
                ..TodoChanges::default()
            }
        );

        let changes = validate_update(&TodoForm::default()).unwrap();
        assert_eq!(changes, TodoChanges::default());
    }

    #[test]
    fn update_clears_submitted_empty_fields() {
        let changes = validate_update(&form(None, Some(""), Some(""))).unwrap();
        assert_eq!(changes.description, Some(String::new()));
        assert_eq!(changes.due_date, Some(None));
    }

    #[test]
    fn update_rejects_submitted_empty_title() {
        let errors = validate_update(&form(Some(""), None, None)).unwrap_err();
        assert_eq!(errors.get("title"), Some(&vec![REQUIRED.to_string()]));
    }

    #[test]
    fn update_parses_resolved() {
        let mut submitted = TodoForm::default();

        for (raw, expected) in &[("true", true), ("on", true), ("Yes", true), ("false", false), ("0", false), ("", false)] {
            submitted.resolved = Some(raw.to_string());
            let changes = validate_update(&submitted).unwrap();
            assert_eq!(changes.resolved, Some(*expected), "{}", raw);
        }

        submitted.resolved = Some("maybe".to_string());
        let errors = validate_update(&submitted).unwrap_err();
        assert_eq!(errors.get("resolved"), Some(&vec![INVALID_BOOLEAN.to_string()]));
    }

    #[test]
    fn update_reports_bad_date_on_its_field() {
        let errors = validate_update(&form(None, None, Some("31/31/2026"))).unwrap_err();
        assert_eq!(errors.get("due_date"), Some(&vec![INVALID_DATE.to_string()]));
    }
}
