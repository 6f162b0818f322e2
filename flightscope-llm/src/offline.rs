//! Offline answers built from summary statistics.
//!
//! Used when no language model credential is configured. The question is
//! matched against a few keyword families and answered from the counts in the
//! [`FlightSummary`]; anything unrecognized gets a general overview.

use flightscope_core::FlightSummary;

const COUNT_WORDS: &[&str] = &["сколько", "количество", "how many", "number of"];
const COUNTRY_WORDS: &[&str] = &["стран", "countr"];
const FLIGHT_WORDS: &[&str] = &["рейс", "flight"];
const AIRLINE_WORDS: &[&str] = &["авиакомпани", "airline"];

fn mentions(question: &str, words: &[&str]) -> bool {
    words.iter().any(|word| question.contains(word))
}

fn join_names(entries: &[(&str, usize)]) -> String {
    entries
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Answer `question` about `airport_code` without a language model.
pub fn offline_answer(question: &str, summary: &FlightSummary, airport_code: &str) -> String {
    let question = question.to_lowercase();
    let country_count = summary.countries.len();

    if mentions(&question, COUNT_WORDS) {
        if mentions(&question, COUNTRY_WORDS) {
            let mut names: Vec<&str> = summary.countries.keys().map(String::as_str).collect();
            names.sort_unstable();
            let ellipsis = if names.len() > 5 { "..." } else { "" };
            names.truncate(5);
            return format!(
                "В аэропорт {} прилетают рейсы из {} стран: {}{}.",
                airport_code,
                country_count,
                names.join(", "),
                ellipsis
            );
        }
        if mentions(&question, FLIGHT_WORDS) {
            return format!(
                "Всего проанализировано {} рейсов в аэропорт {}.",
                summary.total_flights, airport_code
            );
        }
    } else if mentions(&question, AIRLINE_WORDS) {
        return format!(
            "Основные авиакомпании, выполняющие рейсы в {}: {}.",
            airport_code,
            join_names(&summary.top_airlines(3))
        );
    } else if mentions(&question, COUNTRY_WORDS) {
        return format!(
            "Основные страны отправления рейсов в {}: {}.",
            airport_code,
            join_names(&summary.top_countries(5))
        );
    }

    format!(
        "📊 Анализ данных для аэропорта {code}:\n\
         \n\
         • Всего рейсов: {total}\n\
         • Стран отправления: {countries}\n\
         • Авиакомпаний: {airlines}\n\
         • Основные страны: {top}\n\
         \n\
         *Примечание: Это демонстрационный ответ. Для полного анализа с помощью ИИ настройте ключ LLM API.*",
        code = airport_code,
        total = summary.total_flights,
        countries = country_count,
        airlines = summary.airlines.len(),
        top = join_names(&summary.top_countries(3)),
    )
}
