//! Shared fixture: a small three-brand export shaped like a real design
//! system (primitives → brand mappings → breakpoint / color-mode semantics
//! → density → components).
//!
//! Brands: `bild`, `sportbild`, `advertorial` (colors from `bild`).
//! Breakpoints `sm`/`lg`, color modes `light`/`dark`, densities
//! `default`/`dense`.

#![allow(dead_code)]

use serde_json::{json, Value as Json};
use token_graph::{AxisConfig, AxisKey, PipelineOptions, RawExport, TokenGraph};

fn alias(id: &str) -> Json {
    json!({ "type": "VARIABLE_ALIAS", "id": id })
}

fn rgba(r: f64, g: f64, b: f64, a: f64) -> Json {
    json!({ "r": r, "g": g, "b": b, "a": a })
}

fn var(id: &str, name: &str, collection: &str, ty: &str, values: Json) -> Json {
    json!({
        "id": id,
        "name": name,
        "variableCollectionId": collection,
        "resolvedType": ty,
        "valuesByMode": values,
    })
}

fn size(n: u32) -> Json {
    var(&format!("V:s{n}"), &format!("Size/{n}"), "C:size", "FLOAT", json!({ "size:value": n }))
}

pub fn export_json() -> Json {
    let collections = json!([
        { "id": "C:color", "name": "_ColorPrimitive", "modes": [{ "modeId": "color:value", "name": "Value" }] },
        { "id": "C:size", "name": "_SizePrimitive", "modes": [{ "modeId": "size:value", "name": "Value" }] },
        { "id": "C:font", "name": "_FontPrimitive", "modes": [{ "modeId": "font:value", "name": "Value" }] },
        { "id": "C:btm", "name": "BrandTokenMapping", "modes": [
            { "modeId": "btm:1", "name": "bild" },
            { "modeId": "btm:2", "name": "sportbild" },
            { "modeId": "btm:3", "name": "advertorial" }
        ]},
        { "id": "C:bcm", "name": "BrandColorMapping", "modes": [
            { "modeId": "bcm:1", "name": "bild" },
            { "modeId": "bcm:2", "name": "sportbild" }
        ]},
        { "id": "C:density", "name": "Density", "modes": [
            { "modeId": "d:default", "name": "default" },
            { "modeId": "d:dense", "name": "dense" }
        ]},
        { "id": "C:bp", "name": "Breakpoint Mode", "modes": [
            { "modeId": "bp:sm", "name": "sm" },
            { "modeId": "bp:lg", "name": "lg" }
        ]},
        { "id": "C:cm", "name": "ColorMode", "modes": [
            { "modeId": "cm:light", "name": "light" },
            { "modeId": "cm:dark", "name": "dark" }
        ]},
        { "id": "C:comp", "name": "Component Tokens", "modes": [{ "modeId": "comp:default", "name": "Default" }] }
    ]);

    let mut variables = vec![
        var("V:red", "Color/red", "C:color", "COLOR", json!({ "color:value": rgba(1.0, 0.0, 0.0, 1.0) })),
        var("V:blue", "Color/blue", "C:color", "COLOR", json!({ "color:value": rgba(0.0, 0.0, 1.0, 1.0) })),
        var("V:ink", "Color/ink", "C:color", "COLOR", json!({ "color:value": rgba(0.0, 0.0, 0.0, 0.25) })),
        var("V:fam", "Font/family/gotham", "C:font", "STRING", json!({ "font:value": "Gotham" })),
    ];
    variables.extend([8, 16, 20, 24, 32, 40, 48].into_iter().map(size));
    variables.extend([
        // Brand mappings: modes picked by brand name.
        var("V:btm:family", "Brand/headlineFamily", "C:btm", "STRING", json!({
            "btm:1": alias("V:fam"), "btm:2": alias("V:fam"), "btm:3": "Arial"
        })),
        var("V:btm:size", "Brand/headlineSize", "C:btm", "FLOAT", json!({
            "btm:1": alias("V:s32"), "btm:2": alias("V:s24"), "btm:3": alias("V:s32")
        })),
        var("V:btm:weight", "Brand/headlineFontWeight", "C:btm", "STRING", json!({
            "btm:1": "Black Italic", "btm:2": "700", "btm:3": "Bold"
        })),
        var("V:bcm:primary", "Brand/primary", "C:bcm", "COLOR", json!({
            "bcm:1": alias("V:red"), "bcm:2": alias("V:blue")
        })),
        // Density layer.
        var("V:d:gap", "Density/stackGap", "C:density", "FLOAT", json!({
            "d:default": alias("V:s16"), "d:dense": alias("V:s8")
        })),
        // Breakpoint semantics.
        var("V:bp:headlineSize", "Typography/headlineFontSize", "C:bp", "FLOAT", json!({
            "bp:sm": alias("V:btm:size"), "bp:lg": alias("V:s40")
        })),
        var("V:bp:headlineLH", "Typography/headlineLineHeight", "C:bp", "FLOAT", json!({
            "bp:sm": alias("V:s40"), "bp:lg": alias("V:s48")
        })),
        var("V:bp:bodySize", "Typography/bodyFontSize", "C:bp", "FLOAT", json!({
            "bp:sm": 16, "bp:lg": 20
        })),
        var("V:bp:bodyLH", "Typography/bodyLineHeight", "C:bp", "FLOAT", json!({
            "bp:sm": 24, "bp:lg": 24
        })),
        var("V:bp:captionLH", "Typography/captionLineHeight", "C:bp", "FLOAT", json!({
            "bp:sm": 20, "bp:lg": 20
        })),
        var("V:bp:orphanLH", "Typography/orphanLineHeight", "C:bp", "FLOAT", json!({
            "bp:sm": 99, "bp:lg": 99
        })),
        var("V:bp:stackGap", "Spacing/stackGap", "C:bp", "FLOAT", json!({
            "bp:sm": alias("V:d:gap"), "bp:lg": alias("V:s24")
        })),
        var("V:bp:loopA", "Spacing/loopA", "C:bp", "FLOAT", json!({
            "bp:sm": alias("V:bp:loopB"), "bp:lg": alias("V:bp:loopB")
        })),
        var("V:bp:loopB", "Spacing/loopB", "C:bp", "FLOAT", json!({
            "bp:sm": alias("V:bp:loopA"), "bp:lg": alias("V:bp:loopA")
        })),
        var("V:bp:dangling", "Spacing/dangling", "C:bp", "FLOAT", json!({
            "bp:sm": alias("V:gone"), "bp:lg": 4
        })),
        var("V:bp:btnLH", "Component/Button/labelLineHeight", "C:bp", "FLOAT", json!({
            "bp:sm": alias("V:bp:headlineLH"), "bp:lg": alias("V:bp:headlineLH")
        })),
        // Color-mode semantics.
        var("V:cm:surface", "Color/surface", "C:cm", "COLOR", json!({
            "cm:light": alias("V:bcm:primary"), "cm:dark": rgba(0.0, 0.0, 0.0, 1.0)
        })),
        // Components.
        var("V:c:btnGap", "Component/Button/gap", "C:comp", "FLOAT", json!({
            "comp:default": alias("V:bp:stackGap")
        })),
        var("V:c:btnBg", "Component/Button/background", "C:comp", "COLOR", json!({
            "comp:default": alias("V:cm:surface")
        })),
    ]);

    let text_styles = json!([
        {
            "id": "S:headline",
            "name": "Headline/Large",
            "fontName": { "family": "Gotham", "style": "Bold Italic" },
            "fontSize": 99,
            "lineHeight": { "unit": "PIXELS", "value": 99 },
            "boundVariables": {
                "fontFamily": alias("V:btm:family"),
                "fontStyle": alias("V:btm:weight"),
                "fontSize": alias("V:bp:headlineSize"),
                "lineHeight": alias("V:bp:headlineLH")
            }
        },
        {
            "id": "S:caption",
            "name": "Body/Caption",
            "fontName": { "family": "Gotham", "style": "Regular" },
            "fontSize": 16,
            "lineHeight": { "unit": "PIXELS", "value": 20 },
            "letterSpacing": { "unit": "PERCENT", "value": 5 }
        },
        {
            "id": "S:body",
            "name": "Body/Default",
            "fontName": { "family": "Gotham", "style": "Medium" },
            "fontSize": 20,
            "lineHeight": { "unit": "PERCENT", "value": 150 },
            "textCase": "ORIGINAL"
        },
        {
            "id": "S:label",
            "name": "Label/Auto",
            "fontName": { "family": "Gotham", "style": "Italic" },
            "fontSize": 14,
            "lineHeight": { "unit": "AUTO" }
        }
    ]);

    let effect_styles = json!([
        {
            "id": "E:card",
            "name": "Elevation/Card",
            "effects": [
                {
                    "type": "DROP_SHADOW",
                    "color": rgba(0.0, 0.0, 0.0, 0.25),
                    "offset": { "x": 0, "y": 2 },
                    "radius": 8,
                    "spread": 0,
                    "blendMode": "NORMAL",
                    "boundVariables": { "color": alias("V:cm:surface"), "radius": alias("V:s8") }
                },
                {
                    "type": "INNER_SHADOW",
                    "color": rgba(1.0, 1.0, 1.0, 0.5),
                    "offset": { "x": 0, "y": 1 },
                    "radius": 0
                },
                { "type": "LAYER_BLUR", "radius": 4 },
                { "type": "DROP_SHADOW", "visible": false, "radius": 30 }
            ]
        }
    ]);

    json!({
        "collections": collections,
        "variables": variables,
        "textStyles": text_styles,
        "effectStyles": effect_styles,
    })
}

pub fn config_json() -> Json {
    json!({
        "brands": [
            { "name": "bild" },
            { "name": "sportbild" },
            { "name": "advertorial", "colorsFrom": "bild" }
        ],
        "breakpoints": [{ "key": "sm", "modeId": "bp:sm" }, { "key": "lg", "modeId": "bp:lg" }],
        "colorModes": [{ "key": "light", "modeId": "cm:light" }, { "key": "dark", "modeId": "cm:dark" }],
        "densities": [{ "key": "default", "modeId": "d:default" }, { "key": "dense", "modeId": "d:dense" }]
    })
}

pub fn export() -> RawExport {
    serde_json::from_value(export_json()).expect("fixture export parses")
}

pub fn config() -> AxisConfig {
    serde_json::from_value(config_json()).expect("fixture config parses")
}

pub fn graph() -> TokenGraph {
    TokenGraph::from_export(export(), config(), PipelineOptions::default()).expect("fixture graph builds")
}

pub fn graph_with(options: PipelineOptions) -> TokenGraph {
    TokenGraph::from_export(export(), config(), options).expect("fixture graph builds")
}

pub fn bp(brand: &str, breakpoint: &str) -> AxisKey {
    AxisKey::brand_breakpoint(brand, breakpoint)
}

pub fn cm(brand: &str, color_mode: &str) -> AxisKey {
    AxisKey::brand_color_mode(brand, color_mode)
}
