use crate::domain::model::AggregatedTeam;
use crate::utils::error::{PoolError, Result};

/// HTML projection of the ranked standings: the top table ranks members,
/// then one section per member lists their countries in the member's
/// active sort order.
pub fn render_html(teams: &[AggregatedTeam], updated_at: Option<&str>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Medal Pool Standings</title>\n<style>\n");
    html.push_str(
        "body { font-family: sans-serif; margin: 2rem auto; max-width: 52rem; }\n\
         table { border-collapse: collapse; width: 100%; margin-bottom: 1.5rem; }\n\
         th, td { border: 1px solid #ccc; padding: 0.35rem 0.6rem; text-align: right; }\n\
         th:first-child, td:first-child { text-align: left; }\n\
         tr.rank-1 td { background: #ffe9a8; }\n\
         tr.rank-2 td { background: #e8e8e8; }\n\
         tr.rank-3 td { background: #f3d8c2; }\n\
         .updated { color: #666; font-size: 0.85rem; }\n",
    );
    html.push_str("</style>\n</head>\n<body>\n<h1>Medal Pool Standings</h1>\n");

    match updated_at {
        Some(stamp) => {
            html.push_str(&format!(
                "<p class=\"updated\">Updated {}</p>\n",
                escape_html(stamp)
            ));
        }
        None => html.push_str("<p class=\"updated\">Medal totals not yet updated</p>\n"),
    }

    html.push_str("<table class=\"standings\">\n<thead><tr>");
    for header in ["Rank", "Member", "Value", "Gold", "Silver", "Bronze", "Points"] {
        html.push_str(&format!("<th>{}</th>", header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (index, team) in teams.iter().enumerate() {
        let rank = index + 1;
        if rank <= 3 {
            html.push_str(&format!("<tr class=\"rank-{}\">", rank));
        } else {
            html.push_str("<tr>");
        }
        html.push_str(&format!(
            "<td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
            rank,
            escape_html(&team.member),
            format_value(team.draft_value),
            team.gold,
            team.silver,
            team.bronze,
            team.total_points
        ));
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    for team in teams {
        html.push_str(&format!(
            "<section class=\"team\">\n<h2>{} ({} pts)</h2>\n",
            escape_html(&team.member),
            team.total_points
        ));
        html.push_str("<table class=\"countries\">\n<thead><tr>");
        for header in ["Country", "Value", "Gold", "Silver", "Bronze", "Points", "Pts/Value"] {
            html.push_str(&format!("<th>{}</th>", header));
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for country in &team.countries {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>\n",
                escape_html(&country.entry.country),
                format_value(country.entry.draft_value),
                country.entry.gold,
                country.entry.silver,
                country.entry.bronze,
                country.points,
                country.ratio()
            ));
        }
        html.push_str("</tbody>\n</table>\n</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Plain-text projection for the terminal.
pub fn render_text(teams: &[AggregatedTeam], updated_at: Option<&str>) -> String {
    let mut lines = vec!["MEDAL POOL STANDINGS".to_string()];
    match updated_at {
        Some(stamp) => lines.push(format!("Updated: {}", stamp)),
        None => lines.push("Medal totals not yet updated".to_string()),
    }
    lines.push(String::new());
    lines.push(format!(
        "{:>4}  {:<16} {:>7} {:>4} {:>4} {:>4} {:>7}",
        "Rank", "Member", "Value", "G", "S", "B", "Points"
    ));

    for (index, team) in teams.iter().enumerate() {
        lines.push(format!(
            "{:>4}  {:<16} {:>7} {:>4} {:>4} {:>4} {:>7}",
            index + 1,
            team.member,
            format_value(team.draft_value),
            team.gold,
            team.silver,
            team.bronze,
            team.total_points
        ));
    }

    for team in teams {
        lines.push(String::new());
        lines.push(format!("{} ({} pts)", team.member, team.total_points));
        for country in &team.countries {
            lines.push(format!(
                "  {:<16} {:>7} {:>4} {:>4} {:>4} {:>5} {:>8.2}",
                country.entry.country,
                format_value(country.entry.draft_value),
                country.entry.gold,
                country.entry.silver,
                country.entry.bronze,
                country.points,
                country.ratio()
            ));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Flat CSV projection, one row per (member, country) pair, in display
/// order.
pub fn render_csv(teams: &[AggregatedTeam]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "member",
        "country",
        "draftValue",
        "gold",
        "silver",
        "bronze",
        "points",
    ])?;

    for team in teams {
        for country in &team.countries {
            writer.write_record(&[
                team.member.clone(),
                country.entry.country.clone(),
                format_value(country.entry.draft_value),
                country.entry.gold.to_string(),
                country.entry.silver.to_string(),
                country.entry.bronze.to_string(),
                country.points.to_string(),
            ])?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| PoolError::ProcessingError {
        message: format!("CSV buffer error: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| PoolError::ProcessingError {
        message: format!("CSV output was not UTF-8: {}", e),
    })
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::aggregate;
    use crate::core::rank::rank_teams;
    use crate::domain::model::Entry;

    fn teams() -> Vec<AggregatedTeam> {
        let entries = vec![
            Entry {
                member: "Chris".to_string(),
                country: "Italy".to_string(),
                draft_value: 19.0,
                gold: 0,
                silver: 1,
                bronze: 1,
            },
            Entry {
                member: "Dad".to_string(),
                country: "Norway".to_string(),
                draft_value: 54.0,
                gold: 2,
                silver: 0,
                bronze: 0,
            },
        ];
        let mut teams = aggregate(&entries);
        rank_teams(&mut teams);
        teams
    }

    #[test]
    fn test_html_ranks_and_escapes() {
        let mut teams = teams();
        teams[0].member = "A & B".to_string();

        let html = render_html(&teams, Some("2026-02-10T12:00:00.000Z"));
        assert!(html.contains("tr class=\"rank-1\""));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("Updated 2026-02-10T12:00:00.000Z"));

        // Leader renders before the runner-up.
        let dad = html.find("rank-1").unwrap();
        let chris = html.find("Chris").unwrap_or(usize::MAX);
        assert!(dad < chris);
    }

    #[test]
    fn test_html_without_timestamp() {
        let html = render_html(&teams(), None);
        assert!(html.contains("not yet updated"));
    }

    #[test]
    fn test_csv_one_row_per_country() {
        let csv = render_csv(&teams()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("member,country,draftValue,gold,silver,bronze,points")
        );
        assert_eq!(lines.next(), Some("Dad,Norway,54,2,0,0,8"));
        assert_eq!(lines.next(), Some("Chris,Italy,19,0,1,1,3"));
    }

    #[test]
    fn test_text_contains_rank_table() {
        let text = render_text(&teams(), None);
        assert!(text.contains("MEDAL POOL STANDINGS"));
        assert!(text.contains("Dad"));
        assert!(text.contains("Norway"));
    }
}
