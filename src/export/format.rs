//! Display formatting shared by reports and the dashboard.

/// Rounds to a whole number and groups thousands with spaces: `12 345`.
#[must_use]
pub fn grouped(x: f64) -> String {
    let rounded = x.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[must_use]
pub fn area(x: f64) -> String {
    format!("{} m²", grouped(x))
}

/// Formats a fraction as a percentage with one decimal.
#[must_use]
pub fn pct(fraction: f64) -> String {
    format!("{:.1} %", fraction * 100.0)
}

#[must_use]
pub fn eur(x: f64) -> String {
    format!("{} €", grouped(x))
}

#[must_use]
pub fn eur_per_m2(x: f64) -> String {
    format!("{} €/m²", grouped(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn groups_thousands() {
        assert_eq!(grouped(0.0), "0");
        assert_eq!(grouped(999.4), "999");
        assert_eq!(grouped(1680.0), "1 680");
        assert_eq!(grouped(17_633_333.3), "17 633 333");
        assert_eq!(grouped(-1650.0), "-1 650");
    }

    #[test]
    fn units() {
        assert_eq!(area(6720.0), "6 720 m²");
        assert_eq!(pct(0.548), "54.8 %");
        assert_eq!(eur(2_250_000.0), "2 250 000 €");
        assert_eq!(eur_per_m2(3200.0), "3 200 €/m²");
    }
}
