//! Built-in definitions for an ISG running with the English web interface.
use crate::{MetricDefinition, Page, Scale};

pub const NAMESPACE: &str = "stiebeleltron";
pub const SYSTEM_INFO_PATH: &str = "/?s=1,0";
pub const HEAT_PUMP_INFO_PATH: &str = "/?s=1,1";

const KWH_TO_WS: f64 = 3.6e6;
const MWH_TO_WS: f64 = 3.6e9;
const HOURS_TO_SECONDS: f64 = 3600.0;

fn metric(name: &str, help: &str, group: &str, property: &str) -> MetricDefinition {
    MetricDefinition::new(format!("{NAMESPACE}_{name}"), group, property).with_help(help)
}

pub fn default_pages() -> Vec<Page> {
    vec![system_info_page(), heat_pump_info_page()]
}

fn system_info_page() -> Page {
    const GENERAL: &str = "GENERAL";
    const HEATING: &str = "HEATING";
    const ROOM: &str = "ROOM TEMPERATURE";
    const DHW: &str = "DHW";
    const REHEATING: &str = "ELECTRIC REHEATING";

    let room_help = "Room temperature in heating circuit in Celsius";
    let heating_help = "Heating temperature in Celsius";
    let buffer_help = "Buffer temperature in Celsius";
    let dhw_help = "Domestic hot water temperature in Celsius";

    let mut page = Page::new("system_info", SYSTEM_INFO_PATH)
        .with_metric(metric(
            "general_outside_temperature",
            "Outside temperature in Celsius",
            HEATING,
            "OUTSIDE TEMPERATURE",
        ))
        .with_metric(metric(
            "general_condenser_temperature",
            "Condenser temperature in Celsius",
            GENERAL,
            "CONDENSER TEMP.",
        ))
        .with_metric(
            metric(
                "general_flow_rate",
                "Flow rate in liters per second",
                GENERAL,
                "FLOW RATE",
            )
            .with_scale(Scale::Divide(60.0)),
        )
        .with_metric(metric(
            "general_heatingcircuit_pressure",
            "Heating circuit pressure in bar",
            GENERAL,
            "PRESSURE HTG CIRC",
        ))
        .with_metric(
            metric(
                "general_outputactivity_heatpump",
                "Heat pump activity ratio",
                GENERAL,
                "OUTPUT HP",
            )
            .with_scale(Scale::Divide(100.0)),
        )
        .with_metric(
            metric(
                "general_outputactivity_waterpump",
                "Water pump activity ratio",
                GENERAL,
                "INT PUMP RATE",
            )
            .with_scale(Scale::Divide(100.0)),
        );

    for circuit in ["1", "2"] {
        for (kind, prefix) in [("actual", "ACTUAL"), ("set", "SET")] {
            let property = format!("{prefix} TEMPERATURE HC {circuit}");
            page = page
                .with_metric(
                    metric("heatingcircuit_room_temperature", room_help, ROOM, &property)
                        .with_label("heating_circuit", circuit)
                        .with_label("type", kind),
                )
                .with_metric(
                    metric("heating_temperature", heating_help, HEATING, &property)
                        .with_label("heating_circuit", circuit)
                        .with_label("type", kind),
                );
        }
    }

    for (kind, prefix) in [("actual", "ACTUAL"), ("set", "SET")] {
        page = page
            .with_metric(
                metric(
                    "domestic_hot_water_temperature",
                    dhw_help,
                    DHW,
                    &format!("{prefix} TEMPERATURE"),
                )
                .with_label("type", kind),
            )
            .with_metric(
                metric(
                    "heating_buffer_temperature",
                    buffer_help,
                    HEATING,
                    &format!("{prefix} BUFFER TEMPERATURE"),
                )
                .with_label("type", kind),
            );
    }

    page.with_metric(
        metric(
            "heating_fixed_temperature",
            "Fixed heating temperature in Celsius",
            HEATING,
            "SET FIXED TEMPERATURE",
        )
        .with_label("type", "set"),
    )
    .with_metric(metric(
        "heating_flow_heatpump_temperature",
        "Heating flow temperature of the heat pump in Celsius",
        HEATING,
        "ACTUAL FLOW TEMPERATURE WP",
    ))
    .with_metric(metric(
        "reheating_flow_temperature",
        "Reheating flow temperature in Celsius",
        HEATING,
        "ACTUAL FLOW TEMPERATURE NHZ",
    ))
    .with_metric(metric(
        "heating_preflow_temperature",
        "Heating return temperature in Celsius",
        HEATING,
        "ACTUAL RETURN TEMPERATURE",
    ))
    .with_metric(metric(
        "electric_reheating_temperature",
        "Dual mode heating temperature with electric reheating in Celsius",
        REHEATING,
        "DUAL MODE TEMP HEATING",
    ))
    .with_metric(metric(
        "electric_reheating_hotwater_temperature",
        "Dual mode hot water temperature with electric reheating in Celsius",
        REHEATING,
        "DUAL MODE TEMP DHW",
    ))
}

fn heat_pump_info_page() -> Page {
    const RUNTIME: &str = "RUNTIME";
    const AMOUNT_OF_HEAT: &str = "AMOUNT OF HEAT";

    let runtime_help = "Total compressor runtime in seconds";
    let energy_help = "Compressor energy in Ws";

    let mut page = Page::new("heat_pump_info", HEAT_PUMP_INFO_PATH).with_metric(metric(
        "remaining_compressor_rest_seconds",
        "Remaining compressor delay time in seconds",
        "PROCESS DATA",
        "COMP DLAY CNTR",
    ));

    for (component, property) in [
        ("heating", "RNT COMP 1 HEA"),
        ("domestic_hot_water", "RNT COMP 1 DHW"),
        ("reheating1", "BH 1"),
        ("reheating2", "BH 2"),
    ] {
        page = page.with_metric(
            metric("runtime_seconds_total", runtime_help, RUNTIME, property)
                .with_label("component", component)
                .with_scale(Scale::Multiply(HOURS_TO_SECONDS)),
        );
    }

    // Daily counters are reported in kWh, totals in MWh.
    for (component, timeframe, property, factor) in [
        ("heating", "day", "COMPRESSOR HEATING DAY", KWH_TO_WS),
        ("heating", "total", "COMPRESSOR HEATING TOTAL", MWH_TO_WS),
        ("domestic_hot_water", "day", "COMPRESSOR DHW DAY", KWH_TO_WS),
        ("domestic_hot_water", "total", "COMPRESSOR DHW TOTAL", MWH_TO_WS),
        ("reheating", "total", "BH HEATING TOTAL", MWH_TO_WS),
    ] {
        page = page.with_metric(
            metric("compressor_energy", energy_help, AMOUNT_OF_HEAT, property)
                .with_label("component", component)
                .with_label("timeframe", timeframe)
                .with_scale(Scale::Multiply(factor)),
        );
    }

    page
}
