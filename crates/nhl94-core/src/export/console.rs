//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::cartridge::{Cartridge, Team};
use crate::team::{LINEUP_COUNT, PlayerRecord, Position, Role};

use super::slot_label;

/// Boxed roster listing for one team.
pub fn format_team_console(team: &Team) -> String {
    let mut output = String::new();
    let record = &team.record;

    let title = format!(
        "  {} ({}) @ {:#X}",
        team.display_name(),
        record.abbreviation,
        record.team_pointer
    );
    let border: String = "━".repeat(title.len().max(50));
    let border_dim = border.dimmed();

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "{}", title.bold());
    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  ROSTER : {}G / {}F / {}D",
        record.goalie_count, record.forward_count, record.defenseman_count
    );
    for player in &team.players {
        let _ = writeln!(
            output,
            "  {:>2} {} {:<24} {} {}",
            player.ordinal,
            format_colored_role(player.role),
            player.name,
            format!("#{:<2}", player.jersey_number).dimmed(),
            format_colored_overall(player),
        );
    }
    let _ = write!(output, "{}", border_dim);

    output
}

/// Colored lineup sheet for one team.
pub fn format_lineup_console(team: &Team) -> String {
    let lineup = team.lineup();
    let mut output = String::new();

    let _ = writeln!(output, "{}", team.display_name().bold());
    for line in 0..LINEUP_COUNT {
        let _ = write!(output, "  {}", format!("L{}", line + 1).cyan());
        for position in Position::ALL {
            let label = slot_label(&lineup, lineup.get(line, position));
            let label = if label == "-" {
                label.dimmed().to_string()
            } else {
                label
            };
            let _ = write!(output, "  {} {}", position.short_name().dimmed(), label);
        }
        let _ = writeln!(output);
    }

    output
}

/// One line per team plus any skipped pointers.
pub fn format_cartridge_console(cartridge: &Cartridge) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "{} ({} teams)",
        cartridge.index.cartridge_name.bold(),
        cartridge.index.team_count
    );
    for team in &cartridge.teams {
        let _ = writeln!(
            output,
            "  {:<4} {:<28} {:>8} {:>3} players",
            team.record.abbreviation.green(),
            team.display_name(),
            format!("{:#X}", team.pointer()).dimmed(),
            team.players.len()
        );
    }
    for skip in &cartridge.skipped {
        let _ = writeln!(
            output,
            "  {} {:#X}: {}",
            "SKIP".red(),
            skip.pointer,
            skip.reason
        );
    }

    output
}

fn format_colored_role(role: Role) -> String {
    let name = role.short_name();
    match role {
        Role::Goalie => name.yellow().to_string(),
        Role::Forward => name.green().to_string(),
        Role::Defenseman => name.blue().to_string(),
    }
}

fn format_colored_overall(player: &PlayerRecord) -> String {
    if player.role.is_goalie() {
        return "--".dimmed().to_string();
    }
    let overall = player.overall();
    let text = format!("{:>2}", overall);
    match overall {
        85.. => text.truecolor(255, 200, 0).bold().to_string(),
        70..=84 => text.green().to_string(),
        50..=69 => text.to_string(),
        _ => text.dimmed().to_string(),
    }
}

/// One-line team summary, logged for each decoded team.
pub fn format_team_summary(team: &Team) -> String {
    format!(
        "{} {} ({} players, {}G/{}F/{}D)",
        team.record.abbreviation,
        team.display_name(),
        team.players.len(),
        team.record.goalie_count,
        team.record.forward_count,
        team.record.defenseman_count
    )
}
