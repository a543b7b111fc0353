/// Pin colours by league rank for simple markers, cycled by tier index
pub const RANK_COLORS: [&str; 5] = ["#0000FF", "#008000", "#FF0000", "#FFC0CB", "#FFFF00"];

/// Pin colour for ranks beyond `RANK_COLORS`
pub const DEFAULT_COLOR: &str = "#000000";

/// Text colour chosen for dark backgrounds
pub const LIGHT_TEXT_COLOR: &str = "#FFF";

/// Text colour chosen for light backgrounds, and for unreadable input
pub const DARK_TEXT_COLOR: &str = "#333";

/// Detailed pin fill when a club has no primary colour
pub const FALLBACK_PIN_COLOR: &str = "#CCC";

/// Detailed pin border when a club has no secondary colour
pub const FALLBACK_BORDER_COLOR: &str = "#333";

/// Fallbacks for the second half of a split pin, kept distinct from the first half
pub const FALLBACK_SPLIT_COLOR: &str = "#AAA";
pub const FALLBACK_SPLIT_BORDER_COLOR: &str = "#555";

/// Root of the club logo assets; logos live at `{root}/{country}/icons/{club}.png`
pub const CLUB_LOGO_ROOT: &str = "graphics/logos/clubs";

/// z-index of the pane holding fanned-out markers, above every tier pane
pub const FAN_OUT_PANE_Z_INDEX: i32 = 700;

/// z-index of `tier-0`; each following tier is one lower
pub const TIER_PANE_BASE_Z_INDEX: i32 = 650;

/// z-index offset applied to the active marker inside its pane
pub const ACTIVE_MARKER_Z_OFFSET: i32 = 2000;

/// First fan-out angle in degrees (screen space, y pointing down)
pub const FAN_START_DEGREES: f64 = -125.0;

/// Angular span covered by a fan-out, first to last member
pub const FAN_SPAN_DEGREES: f64 = 110.0;

/// Distance from the group position to each fanned marker, in layer pixels
pub const FAN_RADIUS_PX: f64 = 55.0;

/// Minimum query length (in characters) before search narrows the map
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

/// Zoom used when flying to a search result
pub const SEARCH_RESULT_ZOOM: f64 = 15.0;

/// Delay before a search result's marker is activated, matching the fly-to animation
pub const SEARCH_RESULT_ACTIVATION_DELAY_MS: u32 = 1600;
