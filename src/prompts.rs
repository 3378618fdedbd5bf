pub const EXPLAIN: &str = include_str!("../data/prompts/explain.txt");
pub const SUMMARIZE: &str = include_str!("../data/prompts/summarize.txt");
pub const QUIZ: &str = include_str!("../data/prompts/quiz.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

pub fn explain(doubt: &str) -> String {
    render(EXPLAIN, &[("doubt", doubt)])
}

pub fn summarize(notes: &str) -> String {
    render(SUMMARIZE, &[("notes", notes)])
}

pub fn quiz(source: &str, question_count: u32) -> String {
    render(
        QUIZ,
        &[("count", &question_count.to_string()), ("source", source)],
    )
}
