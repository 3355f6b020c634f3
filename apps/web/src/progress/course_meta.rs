//! Display-only metadata derived from a course's link and name.

/// Link substrings mapped to a platform label. First match wins.
const PLATFORMS: &[(&str, &str)] = &[
    ("youtube.com", "YouTube"),
    ("youtu.be", "YouTube"),
    ("udemy.com", "Udemy"),
    ("coursera.org", "Coursera"),
    ("alura.com", "Alura"),
    ("dio.me", "DIO"),
    ("freecodecamp.org", "freeCodeCamp"),
    ("edx.org", "edX"),
    ("khanacademy.org", "Khan Academy"),
    ("fiap.com", "FIAP"),
    ("microsoft.com", "Microsoft Learn"),
    ("aws.amazon.com", "AWS Skill Builder"),
];

const DEFAULT_PLATFORM: &str = "Online";

pub fn platform_label(link: &str) -> &'static str {
    let link = link.to_lowercase();
    PLATFORMS
        .iter()
        .find(|(needle, _)| link.contains(needle))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_PLATFORM)
}

/// Rough duration estimate from keywords in the course name.
pub fn estimated_duration(name: &str) -> &'static str {
    let name = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

    if has(&["bootcamp", "completo", "formação", "formacao", "carreira"]) {
        "40h"
    } else if has(&["avançado", "avancado", "advanced", "projeto"]) {
        "12h"
    } else if has(&["intermediário", "intermediario", "prático", "pratico"]) {
        "8h"
    } else if has(&["introdução", "introducao", "intro", "básico", "basico", "fundamentos"]) {
        "3h"
    } else {
        "5h"
    }
}
