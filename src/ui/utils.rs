use anyhow::{bail, Context, Result};

/// `#RRGGBB` or `#RRGGBBAA`, alpha not premultiplied.
pub fn parse_hex_color(s: &str) -> Result<egui::Color32> {
    let hex = s.trim().trim_start_matches('#');

    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        bail!("Invalid colour {:?}, expected #RRGGBB or #RRGGBBAA", s);
    }

    let channel = |i: usize| -> Result<u8> {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .with_context(|| format!("Invalid colour {:?}", s))
    };

    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if hex.len() == 8 { channel(6)? } else { 255 };

    Ok(egui::Color32::from_rgba_unmultiplied(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb() {
        assert_eq!(
            parse_hex_color("#FF0000").unwrap(),
            egui::Color32::from_rgb(255, 0, 0)
        );
        assert_eq!(
            parse_hex_color("00ff7f").unwrap(),
            egui::Color32::from_rgb(0, 255, 127)
        );
    }

    #[test]
    fn rgba() {
        assert_eq!(
            parse_hex_color("#FFFFFF55").unwrap(),
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, 0x55)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_hex_color("#FFF").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
        assert!(parse_hex_color("").is_err());
        assert!(parse_hex_color("#ééé").is_err());
    }
}
