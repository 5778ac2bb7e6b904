use crate::models::team::Team;

/// Normalize a display name for fuzzy comparison: drop parenthesized
/// decorations, lowercase, keep only ASCII alphanumerics.
///
/// Fixes lookups where the display name differs from the stored one,
/// e.g. "andi odanx (admin)" vs "andi_odanx".
pub fn normalize_team_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth: u32 = 0;
    for c in name.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => {
                let c = c.to_ascii_lowercase();
                if c.is_ascii_alphanumeric() {
                    out.push(c);
                }
            }
            _ => {}
        }
    }
    out
}

/// Resolve a free-text team name to a stored team, in three stages:
/// exact match, normalized match, then normalized-prefix fallback in either
/// direction. Returns `None` when all stages miss; callers treat that as a
/// soft failure (skip and log), never an abort.
pub fn find_team_by_name<'a>(teams: &'a [Team], name: &str) -> Option<&'a Team> {
    if let Some(team) = teams.iter().find(|t| t.name == name) {
        return Some(team);
    }

    let target = normalize_team_name(name);
    if target.is_empty() {
        tracing::warn!("team name {:?} normalizes to nothing, cannot resolve", name);
        return None;
    }

    if let Some(team) = teams.iter().find(|t| normalize_team_name(&t.name) == target) {
        return Some(team);
    }

    teams.iter().find(|t| {
        let stored = normalize_team_name(&t.name);
        !stored.is_empty() && (stored.starts_with(&target) || target.starts_with(&stored))
    })
}
