use std::fmt::Write;

/// Pixel size of an icon and the point of it that sits on the map position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconGeometry {
    pub size: (u32, u32),
    pub anchor: (u32, u32),
}

pub const SIMPLE_PIN: IconGeometry = IconGeometry { size: (32, 42), anchor: (16, 42) };
pub const DETAILED_PIN: IconGeometry = IconGeometry { size: (36, 48), anchor: (18, 48) };

/// Visual family of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerStyle {
    Simple,
    Detailed,
    Split,
}

/// One diagonal half of a split pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitHalf {
    pub background: String,
    pub border: String,
    pub logo_path: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerIcon {
    /// Coloured pin with a ball glyph
    SimplePin { background: String, glyph_color: String },
    /// Pin in club colours showing the logo, with a glyph if the logo fails to load
    LogoPin { background: String, border: String, logo_path: String, alt: String, glyph_color: String },
    /// Two clubs sharing a stadium, one diagonal half each
    SplitPin { halves: Box<[SplitHalf; 2]> },
    /// Simple-style group pin showing the member count
    SimpleCountPin { background: String, text_color: String, count: usize },
    /// Detailed-style group pin showing the member count
    CountPin { background: String, border: String, text_color: String, count: usize },
}

impl MarkerIcon {
    #[must_use]
    pub fn style(&self) -> MarkerStyle {
        match self {
            MarkerIcon::SimplePin { .. } | MarkerIcon::SimpleCountPin { .. } => MarkerStyle::Simple,
            MarkerIcon::LogoPin { .. } | MarkerIcon::CountPin { .. } => MarkerStyle::Detailed,
            MarkerIcon::SplitPin { .. } => MarkerStyle::Split,
        }
    }

    #[must_use]
    pub fn geometry(&self) -> IconGeometry {
        match self.style() {
            MarkerStyle::Simple => SIMPLE_PIN,
            MarkerStyle::Detailed | MarkerStyle::Split => DETAILED_PIN,
        }
    }

    /// Count shown on group pins
    /// CSS class of the icon container
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            MarkerIcon::SimplePin { .. } | MarkerIcon::SimpleCountPin { .. } => "simple-marker-container",
            MarkerIcon::LogoPin { .. } | MarkerIcon::CountPin { .. } => "custom-marker-container",
            MarkerIcon::SplitPin { .. } => "split-marker-wrapper",
        }
    }

    /// Inner HTML of the icon, styled by the application stylesheet
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        // Writing into a String cannot fail
        let _ = match self {
            MarkerIcon::SimplePin { background, glyph_color } => write!(
                html,
                r#"<div class="simple-marker-pin" style="background-color: {background};"><i class="fa-solid fa-futbol" style="color: {glyph_color};"></i></div>"#
            ),
            MarkerIcon::LogoPin { background, border, logo_path, alt, glyph_color } => write!(
                html,
                r#"<div class="custom-marker-pin" style="background-color: {background}; border-color: {border};"><img class="logo-image" src="{logo_path}" alt="{alt}" onerror="this.parentElement.classList.add('no-logo')"><i class="fa-solid fa-futbol fallback-icon" style="color: {glyph_color};"></i></div>"#,
                alt = escape_attr(alt)
            ),
            MarkerIcon::SplitPin { halves } => {
                let [first, second] = &**halves;
                write!(
                    html,
                    r#"<div class="split-marker-pin">{}{}</div>"#,
                    split_half_html(first, "polygon(0 0, 100% 0, 0 100%)"),
                    split_half_html(second, "polygon(100% 0, 100% 100%, 0 100%)")
                )
            }
            MarkerIcon::SimpleCountPin { background, text_color, count } => write!(
                html,
                r#"<div class="simple-marker-pin" style="background-color: {background}; border: 2px solid {text_color};"><strong style="transform: rotate(45deg); color: {text_color};">{count}</strong></div>"#
            ),
            MarkerIcon::CountPin { background, border, text_color, count } => write!(
                html,
                r#"<div class="custom-marker-pin" style="background-color: {background}; border-color: {border};"><strong class="group-marker-text" style="color: {text_color};">{count}</strong></div>"#
            ),
        };
        html
    }
}

fn split_half_html(half: &SplitHalf, clip_path: &str) -> String {
    format!(
        r#"<div class="split-marker-half" style="background-color: {}; border-color: {}; clip-path: {clip_path};"><div class="split-marker-logo-wrapper"><img src="{}" alt="{}" class="split-marker-logo logo-image"></div></div>"#,
        half.background,
        half.border,
        half.logo_path,
        escape_attr(&half.alt)
    )
}

/// Escape text placed inside a double-quoted HTML attribute
#[must_use]
pub fn escape_attr(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
