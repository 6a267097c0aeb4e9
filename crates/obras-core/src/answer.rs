//! Portuguese replies for expense questions.

use crate::period::Period;
use crate::summary::ExpenseSummary;

/// Reply sent when the user has no project yet.
pub const NO_PROJECTS_ANSWER: &str = "Você ainda não tem nenhuma obra cadastrada. Quer que eu crie uma obra? (Ex: 'criar obra Casa Verde')";

const TOP_CATEGORIES: usize = 3;

/// Renders the reply for a question about `period`.
///
/// `project` is the name of the project the question was scoped to, or
/// `None` when the totals cover every project of the user.
pub fn compose_answer(period: &Period, project: Option<&str>, summary: &ExpenseSummary) -> String {
    let label = match project {
        Some(name) => format!("na obra \"{}\"", name),
        None => "somando todas as suas obras".to_string(),
    };

    let mut answer = format!(
        "No mês {}/{}, {}, você teve **R$ {:.2}** em gastos. ",
        period.month, period.year, label, summary.total
    );

    let categories = summary.top_categories(TOP_CATEGORIES);
    if !categories.is_empty() {
        let listed: Vec<String> = categories
            .iter()
            .map(|(name, amount)| format!("{}: R$ {:.2}", name, amount))
            .collect();
        answer.push_str(&format!("Principais tipos: {}.", listed.join(" | ")));
    }

    answer
}
