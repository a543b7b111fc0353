//! Leaflet bridge.
//!
//! Mirrors the marker layers of a [`MapViewState`] onto a Leaflet map reached
//! through the global `L` namespace. Layers are remounted whenever their
//! generation changes; nothing is patched in place.

use crate::config::TileSource;
use crate::constants::ACTIVE_MARKER_Z_OFFSET;
use crate::geometry::{LatLng, Point, Projection};
use crate::markers::{MarkerDescriptor, MarkerLayer, MarkerRef};
use crate::panes::{PaneHost, TierPanes};
use crate::view_state::{LayerState, MapViewState};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Receives clicks on mounted markers
pub type MarkerClickHandler = Rc<dyn Fn(MarkerRef)>;

type JsHandler = Closure<dyn FnMut(JsValue)>;

fn get(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn method(target: &JsValue, name: &str) -> Result<js_sys::Function, JsValue> {
    get(target, name)?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| JsValue::from_str(&format!("{name} is not a function")))
}

fn number(target: &JsValue, key: &str) -> f64 {
    get(target, key).ok().and_then(|value| value.as_f64()).unwrap_or_default()
}

fn pair(a: f64, b: f64) -> js_sys::Array {
    js_sys::Array::of2(&JsValue::from_f64(a), &JsValue::from_f64(b))
}

fn lat_lng(position: LatLng) -> js_sys::Array {
    pair(position.lat, position.lng)
}

fn request_animation_frame<F>(f: F)
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once(f);
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Markers currently added to one Leaflet layer
#[derive(Default)]
struct MountedLayer {
    generation: Option<u64>,
    markers: Vec<JsValue>,
    handlers: Vec<JsHandler>,
}

pub struct LeafletMap {
    l: JsValue,
    map: JsValue,
    /// `L.layerGroup`, or `L.markerClusterGroup` while clustering
    markers: JsValue,
    clustered: bool,
    fan_out: JsValue,
    tiles: Option<JsValue>,
    main_mounted: MountedLayer,
    fan_out_mounted: MountedLayer,
    /// Handlers of removed markers; the click that triggered a sync may still be running one
    retired: Vec<JsHandler>,
    active: Option<JsValue>,
    background_click: Option<JsHandler>,
}

impl LeafletMap {
    /// Create the map inside `container`, with the fan-out pane and both marker layers.
    ///
    /// # Errors
    ///
    /// Returns an error if Leaflet is not loaded or any call into it fails
    pub fn new(container: &web_sys::HtmlElement) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let l = get(&window, "L")?;
        if l.is_undefined() {
            return Err(JsValue::from_str("Leaflet (window.L) is not loaded"));
        }

        let options = js_sys::Object::new();
        set(&options, "zoomControl", &JsValue::from_bool(false))?;
        let map = method(&l, "map")?.call2(&l, container, &options)?;

        // L.control.zoom({position: 'bottomleft'}).addTo(map)
        let control = get(&l, "control")?;
        let zoom_options = js_sys::Object::new();
        set(&zoom_options, "position", &JsValue::from_str("bottomleft"))?;
        let zoom = method(&control, "zoom")?.call1(&control, &zoom_options)?;
        method(&zoom, "addTo")?.call1(&zoom, &map)?;

        let (markers, clustered) = new_marker_layer(&l, false)?;
        method(&map, "addLayer")?.call1(&map, &markers)?;
        let fan_out = method(&l, "layerGroup")?.call0(&l)?;
        method(&map, "addLayer")?.call1(&map, &fan_out)?;

        let mut leaflet = Self {
            l,
            map,
            markers,
            clustered,
            fan_out,
            tiles: None,
            main_mounted: MountedLayer::default(),
            fan_out_mounted: MountedLayer::default(),
            retired: Vec::new(),
            active: None,
            background_click: None,
        };
        TierPanes::install_fan_out(&mut leaflet);
        leaflet.invalidate_size_delayed();
        Ok(leaflet)
    }

    /// Route clicks that reach the map background to `handler`
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be registered
    pub fn on_background_click(&mut self, handler: impl Fn() + 'static) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(move |_event: JsValue| handler()) as Box<dyn FnMut(JsValue)>);
        method(&self.map, "on")?.call2(&self.map, &JsValue::from_str("click"), closure.as_ref())?;
        self.background_click = Some(closure);
        Ok(())
    }

    /// Replace the basemap
    ///
    /// # Errors
    ///
    /// Returns an error if the tile layer cannot be created
    pub fn set_tiles(&mut self, tiles: &TileSource, max_zoom: f64) -> Result<(), JsValue> {
        if let Some(old) = self.tiles.take() {
            method(&self.map, "removeLayer")?.call1(&self.map, &old)?;
        }

        let options = js_sys::Object::new();
        set(&options, "attribution", &JsValue::from_str(&tiles.attribution))?;
        set(&options, "maxNativeZoom", &JsValue::from_f64(max_zoom))?;
        set(&options, "maxZoom", &JsValue::from_f64(max_zoom))?;
        let layer = method(&self.l, "tileLayer")?.call2(&self.l, &JsValue::from_str(&tiles.url), &options)?;
        method(&layer, "addTo")?.call1(&layer, &self.map)?;
        self.tiles = Some(layer);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if Leaflet rejects the view
    pub fn set_view(&self, center: LatLng, zoom: f64) -> Result<(), JsValue> {
        method(&self.map, "setView")?.call2(&self.map, &lat_lng(center), &JsValue::from_f64(zoom))?;
        Ok(())
    }

    /// Animated pan and zoom
    ///
    /// # Errors
    ///
    /// Returns an error if Leaflet rejects the view
    pub fn fly_to(&self, center: LatLng, zoom: f64, duration_secs: f64) -> Result<(), JsValue> {
        let options = js_sys::Object::new();
        set(&options, "duration", &JsValue::from_f64(duration_secs))?;
        method(&self.map, "flyTo")?.call3(&self.map, &lat_lng(center), &JsValue::from_f64(zoom), &options)?;
        Ok(())
    }

    /// Run `f` once, the next time the map finishes moving
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be registered
    pub fn once_moveend(&self, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
        let callback = Closure::once_into_js(move |_event: JsValue| f());
        method(&self.map, "once")?.call2(&self.map, &JsValue::from_str("moveend"), &callback)?;
        Ok(())
    }

    fn invalidate_size_delayed(&self) {
        let map = self.map.clone();
        request_animation_frame(move || {
            request_animation_frame(move || {
                if let Ok(invalidate) = method(&map, "invalidateSize") {
                    let _ = invalidate.call0(&map);
                }
            });
        });
    }

    /// Bring the Leaflet layers in line with `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer or marker cannot be created
    pub fn sync(&mut self, state: &MapViewState, on_click: &MarkerClickHandler) -> Result<(), JsValue> {
        self.retired.clear();

        let clustered = state.settings().clustered;
        if clustered != self.clustered {
            self.recreate_marker_layer(clustered)?;
        }

        mount_layer(
            &self.l,
            &self.markers,
            &mut self.main_mounted,
            &mut self.retired,
            MarkerLayer::Main,
            state.layer(MarkerLayer::Main),
            on_click,
        )?;
        mount_layer(
            &self.l,
            &self.fan_out,
            &mut self.fan_out_mounted,
            &mut self.retired,
            MarkerLayer::FanOut,
            state.layer(MarkerLayer::FanOut),
            on_click,
        )?;

        self.apply_active(state.active());
        Ok(())
    }

    fn recreate_marker_layer(&mut self, clustered: bool) -> Result<(), JsValue> {
        method(&self.map, "removeLayer")?.call1(&self.map, &self.markers)?;
        let (markers, clustered) = new_marker_layer(&self.l, clustered)?;
        method(&self.map, "addLayer")?.call1(&self.map, &markers)?;
        self.markers = markers;
        self.clustered = clustered;
        // The new layer is empty, whatever was mounted before
        self.retired.append(&mut self.main_mounted.handlers);
        self.main_mounted = MountedLayer::default();
        Ok(())
    }

    fn apply_active(&mut self, active: Option<MarkerRef>) {
        if let Some(previous) = self.active.take() {
            set_marker_active(&previous, false);
        }

        let marker = active.and_then(|marker| {
            let mounted = match marker.layer {
                MarkerLayer::Main => &self.main_mounted,
                MarkerLayer::FanOut => &self.fan_out_mounted,
            };
            (mounted.generation == Some(marker.generation))
                .then(|| mounted.markers.get(marker.index).cloned())
                .flatten()
        });
        if let Some(marker) = marker {
            set_marker_active(&marker, true);
            self.active = Some(marker);
        }
    }
}

fn new_marker_layer(l: &JsValue, clustered: bool) -> Result<(JsValue, bool), JsValue> {
    if clustered {
        match method(l, "markerClusterGroup") {
            Ok(cluster_group) => return Ok((cluster_group.call0(l)?, true)),
            Err(_) => leptos::logging::error!("Leaflet.markercluster is not loaded; markers stay unclustered"),
        }
    }
    Ok((method(l, "layerGroup")?.call0(l)?, false))
}

fn mount_layer(
    l: &JsValue,
    target: &JsValue,
    mounted: &mut MountedLayer,
    retired: &mut Vec<JsHandler>,
    layer: MarkerLayer,
    snapshot: &LayerState,
    on_click: &MarkerClickHandler,
) -> Result<(), JsValue> {
    if mounted.generation == Some(snapshot.generation()) {
        return Ok(());
    }

    method(target, "clearLayers")?.call0(target)?;
    retired.append(&mut mounted.handlers);
    mounted.markers.clear();
    mounted.generation = Some(snapshot.generation());

    for (index, descriptor) in snapshot.markers().iter().enumerate() {
        let marker_ref = MarkerRef { layer, generation: snapshot.generation(), index };
        let (marker, handler) = build_marker(l, descriptor, marker_ref, Rc::clone(on_click))?;
        mounted.markers.push(marker);
        mounted.handlers.push(handler);
    }

    let all: js_sys::Array = mounted.markers.iter().collect();
    if let Ok(add_layers) = method(target, "addLayers") {
        add_layers.call1(target, &all)?;
    } else {
        let add_layer = method(target, "addLayer")?;
        for marker in &mounted.markers {
            add_layer.call1(target, marker)?;
        }
    }
    Ok(())
}

/// `L.marker` with a `divIcon` for one descriptor, clicks routed to `on_click`
fn build_marker(
    l: &JsValue,
    descriptor: &MarkerDescriptor,
    marker_ref: MarkerRef,
    on_click: MarkerClickHandler,
) -> Result<(JsValue, JsHandler), JsValue> {
    let geometry = descriptor.icon.geometry();
    let icon_options = js_sys::Object::new();
    set(&icon_options, "className", &JsValue::from_str(descriptor.icon.class_name()))?;
    set(&icon_options, "html", &JsValue::from_str(&descriptor.icon.to_html()))?;
    set(&icon_options, "iconSize", &pair(f64::from(geometry.size.0), f64::from(geometry.size.1)))?;
    set(&icon_options, "iconAnchor", &pair(f64::from(geometry.anchor.0), f64::from(geometry.anchor.1)))?;
    let icon = method(l, "divIcon")?.call1(l, &icon_options)?;

    let options = js_sys::Object::new();
    set(&options, "icon", &icon)?;
    set(&options, "pane", &JsValue::from_str(&descriptor.pane.name()))?;
    let marker = method(l, "marker")?.call2(l, &lat_lng(descriptor.position), &options)?;

    if let Some(tooltip) = &descriptor.tooltip {
        let tooltip_options = js_sys::Object::new();
        set(&tooltip_options, "direction", &JsValue::from_str("top"))?;
        set(&tooltip_options, "offset", &pair(tooltip.offset.0, tooltip.offset.1))?;
        method(&marker, "bindTooltip")?.call2(&marker, &JsValue::from_str(&tooltip.text), &tooltip_options)?;
    }

    let dom_event = get(l, "DomEvent")?;
    let handler = Closure::wrap(Box::new(move |event: JsValue| {
        // Marker clicks never reach the map's background handler
        if let Ok(stop) = method(&dom_event, "stopPropagation") {
            let _ = stop.call1(&dom_event, &event);
        }
        on_click(marker_ref);
    }) as Box<dyn FnMut(JsValue)>);
    method(&marker, "on")?.call2(&marker, &JsValue::from_str("click"), handler.as_ref())?;

    Ok((marker, handler))
}

fn set_marker_active(marker: &JsValue, active: bool) {
    let offset = if active { ACTIVE_MARKER_Z_OFFSET } else { 0 };
    if let Ok(set_offset) = method(marker, "setZIndexOffset") {
        let _ = set_offset.call1(marker, &JsValue::from(offset));
    }
    // Markers hidden inside a cluster have no element
    let element = method(marker, "getElement").and_then(|get_element| get_element.call0(marker));
    if let Ok(element) = element.and_then(|e| e.dyn_into::<web_sys::Element>()) {
        let _ = element.class_list().toggle_with_force("active", active);
    }
}

impl Projection for LeafletMap {
    fn lat_lng_to_layer_point(&self, position: LatLng) -> Point {
        match method(&self.map, "latLngToLayerPoint").and_then(|f| f.call1(&self.map, &lat_lng(position))) {
            Ok(point) => Point::new(number(&point, "x"), number(&point, "y")),
            Err(e) => {
                leptos::logging::error!("latLngToLayerPoint failed: {:?}", e);
                Point::default()
            }
        }
    }

    fn layer_point_to_lat_lng(&self, point: Point) -> LatLng {
        match method(&self.map, "layerPointToLatLng").and_then(|f| f.call1(&self.map, &pair(point.x, point.y))) {
            Ok(position) => LatLng::new(number(&position, "lat"), number(&position, "lng")),
            Err(e) => {
                leptos::logging::error!("layerPointToLatLng failed: {:?}", e);
                LatLng::new(0.0, 0.0)
            }
        }
    }
}

impl PaneHost for LeafletMap {
    fn create_pane(&mut self, name: &str, z_index: i32) {
        let result = method(&self.map, "createPane")
            .and_then(|create| create.call1(&self.map, &JsValue::from_str(name)))
            .and_then(|pane| pane.dyn_into::<web_sys::HtmlElement>())
            .and_then(|pane| pane.style().set_property("z-index", &z_index.to_string()));
        if let Err(e) = result {
            leptos::logging::error!("Failed to create pane {}: {:?}", name, e);
        }
    }

    fn remove_pane(&mut self, name: &str) {
        let pane = method(&self.map, "getPane").and_then(|get_pane| get_pane.call1(&self.map, &JsValue::from_str(name)));
        if let Ok(element) = pane.and_then(|p| p.dyn_into::<web_sys::Element>()) {
            element.remove();
        }
    }
}
