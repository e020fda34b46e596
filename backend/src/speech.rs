use crate::{
    holiday::Region,
    query::{Answer, DateMembership, MonthSummary},
    utils::format_spoken_date,
};

pub const SKILL_NAME: &str = "UK Bank Holidays";

pub const WELCOME_REPROMPT: &str = "You can ask me for the next bank holiday, or if a specific date is a bank holiday.";
pub const GOODBYE: &str = "Thank you for using UK Bank Holidays. Goodbye!";
pub const NO_UPCOMING_HOLIDAY: &str = "We could not find any upcoming bank holidays! Please try again later.";
pub const APOLOGY: &str = "Sorry, something went wrong retrieving the bank holiday information! Please try again later.";
pub const DIDNT_CATCH: &str = "Sorry, I didn't quite catch that. ";

pub const ASK_COUNTRY: &str = "What part of the UK are you in? For example: England or Northern Ireland.";
pub const ASK_DATE: &str = "Which date would you like me to check? For example: the twenty fifth of December.";
pub const ASK_MONTH: &str = "Which month would you like to hear about? For example: December.";

#[must_use] pub fn welcome() -> String {
    format!("Welcome to {SKILL_NAME}. {WELCOME_REPROMPT}")
}

/// Pure
///
/// Joins items into one sentence: commas between everything except the last two, which get an
/// "and", then a full stop. Nothing in, nothing out.
#[must_use] pub fn join_sentence<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => format!("{}.", only.as_ref()),
        [init @ .., second_last, last] => {
            let mut sentence = init.iter()
                .map(|s| format!("{}, ", s.as_ref()))
                .collect::<String>();
            sentence.push_str(&format!("{} and {}.", second_last.as_ref(), last.as_ref()));
            sentence
        },
    }
}

/// Pure
///
/// "Title" or "Title (note; other note)"
fn with_notes(title: &str, notes: &[String]) -> String {
    if notes.is_empty() {
        title.into()
    } else {
        format!("{title} ({})", notes.join("; "))
    }
}

fn region_names<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Vec<&'static str> {
    regions.into_iter()
        .map(|r| r.display_name())
        .collect()
}

/// Pure
#[must_use] pub fn render_answer(answer: &Answer) -> String {
    match answer {
        Answer::NextHoliday { region, holiday: Some(holiday) } => {
            let mut text = format!(
                "The next bank holiday in {region} is {} on {}.",
                holiday.title,
                format_spoken_date(&holiday.date)
            );
            if let Some(note) = holiday.note() {
                text.push_str(&format!(" {note}."));
            }
            text
        },
        Answer::NextHoliday { holiday: None, .. } => NO_UPCOMING_HOLIDAY.into(),
        Answer::DateMembership(membership)        => render_date_membership(membership),
        Answer::MonthSummary(summary)             => render_month_summary(summary),
    }
}

/// Pure
#[must_use] pub fn render_date_membership(membership: &DateMembership) -> String {
    let date = format_spoken_date(&membership.date);

    if !membership.is_holiday() {
        return format!("{date} is not a bank holiday.");
    }

    let titles: Vec<String> = membership.titles.iter()
        .map(|t| with_notes(&t.title, &t.notes))
        .collect();

    format!(
        "{date} is a bank holiday in {} It is {}",
        join_sentence(&region_names(&membership.regions)),
        join_sentence(&titles),
    )
}

/// Pure
#[must_use] pub fn render_month_summary(summary: &MonthSummary) -> String {
    let month = summary.month.spoken();

    let mut text = match summary.groups.len() {
        0 => format!("There are no bank holidays in {month}."),
        1 => format!("There is 1 bank holiday in {month}."),
        n => format!("There are {n} bank holidays in {month}."),
    };

    for group in &summary.groups {
        text.push_str(&format!(
            " {} is on {} in {}",
            with_notes(&group.title, &group.notes),
            format_spoken_date(&group.date),
            join_sentence(&region_names(&group.regions)),
        ));
    }

    text
}
