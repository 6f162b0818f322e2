//! Prompt construction.

use flightscope_core::Airport;

/// Build the system prompt for questions about `airport_code`.
///
/// `summary_json` is the rendered flight summary and is embedded verbatim.
pub fn build_system_prompt(airport_code: &str, summary_json: &str) -> String {
    format!(
        "Ты - эксперт по авиационным данным. Твоя задача - анализировать данные о рейсах,\n\
         прилетающих в аэропорт {code}, и отвечать на вопросы пользователей.\n\
         \n\
         Важные правила:\n\
         1. Используй только предоставленные данные о рейсах\n\
         2. Отвечай точно и конкретно на заданный вопрос\n\
         3. Если данных недостаточно для ответа, укажи это\n\
         4. Приводи числовые данные где это уместно\n\
         5. Отвечай на русском языке\n\
         6. Если в вопросе упоминается несколько аэропортов, фокусируйся только на {code}\n\
         \n\
         Доступные данные включают:\n\
         - Страны и города отправления рейсов\n\
         - Авиакомпании\n\
         - Номера рейсов\n\
         - Время прилета\n\
         - Статус рейсов\n\
         \n\
         Данные о рейсах в формате JSON:\n\
         {summary}\n",
        code = airport_code,
        summary = summary_json,
    )
}

/// Name used in sample questions; the city is appended when the name omits it.
pub fn display_name(airport: &Airport) -> String {
    if airport.name.contains(airport.city) {
        airport.name.to_string()
    } else {
        format!("{} ({})", airport.name, airport.city)
    }
}

/// Example questions for the index page.
pub fn sample_questions(airport: &Airport) -> Vec<String> {
    let name = display_name(airport);
    vec![
        format!("Сколько рейсов прилетело в {} из Германии?", name),
        format!("Какие авиакомпании чаще всего летают в {}?", name),
        format!("Из каких стран больше всего рейсов в {}?", name),
        format!("Сколько всего стран представлено в рейсах в {}?", name),
        format!("Какие города чаще всего связаны с {}?", name),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightscope_core::find_airport;

    #[test]
    fn test_prompt_embeds_code_and_summary() {
        let prompt = build_system_prompt("SIN", "{\"total_flights\": 3}");
        assert!(prompt.contains("аэропорт SIN"));
        assert!(prompt.contains("фокусируйся только на SIN"));
        assert!(prompt.ends_with("{\"total_flights\": 3}\n"));
    }

    #[test]
    fn test_sample_questions_use_airport_name() {
        let ams = find_airport("AMS").expect("AMS is registered");
        let questions = sample_questions(ams);
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.contains("Amsterdam Schiphol")));
    }

    #[test]
    fn test_display_name_adds_missing_city() {
        let cdg = find_airport("CDG").expect("CDG is registered");
        let lhr = find_airport("LHR").expect("LHR is registered");
        assert_eq!(display_name(cdg), "Charles de Gaulle (Paris)");
        assert_eq!(display_name(lhr), "London Heathrow");
        assert!(sample_questions(cdg)[0].contains("Charles de Gaulle (Paris)"));
    }
}
