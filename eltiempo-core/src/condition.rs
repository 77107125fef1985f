//! WMO weather-code translation.
//!
//! Open-Meteo reports sky/precipitation state as a small integer
//! (<https://open-meteo.com/en/docs#weathervariables>). The table below covers
//! the full enumerated set; anything else gets a generic placeholder rather
//! than an error.

/// Placeholder for codes outside the WMO table.
pub const UNKNOWN_CONDITION: &str = "Sin descripción disponible";

/// Translate a WMO weather code into a Spanish description.
pub fn describe_weather_code(code: i64) -> &'static str {
    match code {
        0 => "Cielo despejado",
        1 => "Principalmente despejado",
        2 => "Parcialmente nublado",
        3 => "Nublado",
        45 => "Niebla",
        48 => "Niebla con escarcha",
        51 => "Llovizna ligera",
        53 => "Llovizna moderada",
        55 => "Llovizna intensa",
        56 => "Llovizna helada ligera",
        57 => "Llovizna helada intensa",
        61 => "Lluvia ligera",
        63 => "Lluvia moderada",
        65 => "Lluvia intensa",
        66 => "Lluvia helada ligera",
        67 => "Lluvia helada intensa",
        71 => "Nevada ligera",
        73 => "Nevada moderada",
        75 => "Nevada intensa",
        77 => "Granos de nieve",
        80 => "Chubascos ligeros",
        81 => "Chubascos moderados",
        82 => "Chubascos violentos",
        85 => "Chubascos de nieve ligeros",
        86 => "Chubascos de nieve intensos",
        95 => "Tormenta",
        96 => "Tormenta con granizo ligero",
        99 => "Tormenta con granizo intenso",
        _ => UNKNOWN_CONDITION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_translate() {
        assert_eq!(describe_weather_code(0), "Cielo despejado");
        assert_eq!(describe_weather_code(1), "Principalmente despejado");
        assert_eq!(describe_weather_code(63), "Lluvia moderada");
        assert_eq!(describe_weather_code(99), "Tormenta con granizo intenso");
    }

    #[test]
    fn unknown_codes_map_to_placeholder() {
        for code in [-1, 4, 44, 100, 9999] {
            assert_eq!(describe_weather_code(code), UNKNOWN_CONDITION);
        }
    }
}
