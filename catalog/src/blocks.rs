//! Hand-authored standard and additional function blocks.
//!
//! These descriptors mirror the common function blocks of the standard
//! (section 2.5.2.3): bistables, edge detectors, counters, timers, and
//! the additional control blocks. Counters also exist in typed variants
//! for the wide count types.

use phf::{phf_map, Map};
use plcstd_dsl::common::{
    BlockDescriptor, BlockKind, Category, EdgeModifier, ParamSpec,
};
use plcstd_dsl::core::{Id, TableSpan};

/// Comments shown in the block popup, keyed by block name.
static STD_BLOCK_COMMENTS: Map<&'static str, &'static str> = phf_map! {
    "SR" => "SR bistable\nLatch in which the set input dominates.",
    "RS" => "RS bistable\nLatch in which the reset input dominates.",
    "SEMA" => "Semaphore\nGrants software elements mutually exclusive access to a shared resource.",
    "R_TRIG" => "Rising edge detector\nProduces a single pulse when a rising edge is detected.",
    "F_TRIG" => "Falling edge detector\nProduces a single pulse when a falling edge is detected.",
    "CTU" => "Up-counter\nSignals when a count has reached a maximum value.",
    "CTD" => "Down-counter\nSignals when a count has reached zero on counting down from a preset value.",
    "CTUD" => "Up-down counter\nCounts up on the CU input and down on the CD input.",
    "TP" => "Pulse timer\nGenerates output pulses of a given time duration.",
    "TON" => "On-delay timer\nDelays raising an output for a fixed period after its input becomes true.",
    "TOF" => "Off-delay timer\nDelays clearing an output for a fixed period after its input goes false.",
    "RTC" => "Real time clock\nProvides the current date and time for time stamping and reports.",
    "INTEGRAL" => "Integral\nIntegrates the value of the XIN input over time.",
    "DERIVATIVE" => "Derivative\nProduces an output proportional to the rate of change of the XIN input.",
    "PID" => "PID\nClassical three term controller for closed loop control.",
    "RAMP" => "Ramp\nDrives its output along a ramp between two values.",
    "HYSTERESIS" => "Hysteresis\nBoolean output driven by the difference of two floating point inputs.",
};

/// Comment for the named block. Typed counter variants such as
/// CTU_DINT share the base counter's comment.
pub fn block_comment(name: &str) -> &'static str {
    if let Some(comment) = STD_BLOCK_COMMENTS.get(name) {
        return *comment;
    }
    match name.split_once('_') {
        Some((base, _)) => STD_BLOCK_COMMENTS.get(base).copied().unwrap_or(""),
        None => "",
    }
}

fn input(name: &str, param_type: &str) -> ParamSpec {
    ParamSpec::new(name, param_type, EdgeModifier::None)
}

fn rising_input(name: &str, param_type: &str) -> ParamSpec {
    ParamSpec::new(name, param_type, EdgeModifier::Rising)
}

fn output(name: &str, param_type: &str) -> ParamSpec {
    ParamSpec::new(name, param_type, EdgeModifier::None)
}

fn function_block(
    name: &str,
    inputs: Vec<ParamSpec>,
    outputs: Vec<ParamSpec>,
) -> BlockDescriptor {
    BlockDescriptor {
        name: Id::from(name),
        kind: BlockKind::FunctionBlock,
        extensible: false,
        inputs,
        outputs,
        comment: block_comment(name).to_string(),
        usage: String::new(),
        generate: None,
        base_input_number: 1,
        span: TableSpan::builtin(),
    }
}

/// Count types with dedicated counter variants beyond the plain INT
/// counters.
const COUNTER_TYPES: &[&str] = &["DINT", "LINT", "UDINT", "ULINT"];

fn up_counter(name: &str, count_type: &str) -> BlockDescriptor {
    function_block(
        name,
        vec![
            rising_input("CU", "BOOL"),
            input("R", "BOOL"),
            input("PV", count_type),
        ],
        vec![output("Q", "BOOL"), output("CV", count_type)],
    )
}

fn down_counter(name: &str, count_type: &str) -> BlockDescriptor {
    function_block(
        name,
        vec![
            rising_input("CD", "BOOL"),
            input("LD", "BOOL"),
            input("PV", count_type),
        ],
        vec![output("Q", "BOOL"), output("CV", count_type)],
    )
}

fn up_down_counter(name: &str, count_type: &str) -> BlockDescriptor {
    function_block(
        name,
        vec![
            rising_input("CU", "BOOL"),
            rising_input("CD", "BOOL"),
            input("R", "BOOL"),
            input("LD", "BOOL"),
            input("PV", count_type),
        ],
        vec![
            output("QU", "BOOL"),
            output("QD", "BOOL"),
            output("CV", count_type),
        ],
    )
}

/// The hand-authored block categories, in declaration order.
pub fn standard_function_blocks() -> Vec<Category> {
    let mut standard = vec![
        function_block(
            "SR",
            vec![input("S1", "BOOL"), input("R", "BOOL")],
            vec![output("Q1", "BOOL")],
        ),
        function_block(
            "RS",
            vec![input("S", "BOOL"), input("R1", "BOOL")],
            vec![output("Q1", "BOOL")],
        ),
        function_block(
            "SEMA",
            vec![input("CLAIM", "BOOL"), input("RELEASE", "BOOL")],
            vec![output("BUSY", "BOOL")],
        ),
        function_block("R_TRIG", vec![input("CLK", "BOOL")], vec![output("Q", "BOOL")]),
        function_block("F_TRIG", vec![input("CLK", "BOOL")], vec![output("Q", "BOOL")]),
    ];

    standard.push(up_counter("CTU", "INT"));
    for count_type in COUNTER_TYPES {
        standard.push(up_counter(&format!("CTU_{}", count_type), count_type));
    }
    standard.push(down_counter("CTD", "INT"));
    for count_type in COUNTER_TYPES {
        standard.push(down_counter(&format!("CTD_{}", count_type), count_type));
    }
    standard.push(up_down_counter("CTUD", "INT"));
    for count_type in COUNTER_TYPES {
        standard.push(up_down_counter(&format!("CTUD_{}", count_type), count_type));
    }

    standard.extend([
        function_block(
            "TP",
            vec![input("IN", "BOOL"), input("PT", "TIME")],
            vec![output("Q", "BOOL"), output("ET", "TIME")],
        ),
        function_block(
            "TON",
            vec![input("IN", "BOOL"), input("PT", "TIME")],
            vec![output("Q", "BOOL"), output("ET", "TIME")],
        ),
        function_block(
            "TOF",
            vec![input("IN", "BOOL"), input("PT", "TIME")],
            vec![output("Q", "BOOL"), output("ET", "TIME")],
        ),
        function_block(
            "RTC",
            vec![input("IN", "BOOL"), input("PDT", "DT")],
            vec![output("Q", "BOOL"), output("CDT", "DT")],
        ),
    ]);

    let additional = vec![
        function_block(
            "INTEGRAL",
            vec![
                input("RUN", "BOOL"),
                input("R1", "BOOL"),
                input("XIN", "REAL"),
                input("X0", "REAL"),
                input("CYCLE", "TIME"),
            ],
            vec![output("Q", "BOOL"), output("XOUT", "REAL")],
        ),
        function_block(
            "DERIVATIVE",
            vec![
                input("RUN", "BOOL"),
                input("XIN", "REAL"),
                input("CYCLE", "TIME"),
            ],
            vec![output("XOUT", "REAL")],
        ),
        function_block(
            "PID",
            vec![
                input("AUTO", "BOOL"),
                input("PV", "REAL"),
                input("SP", "REAL"),
                input("X0", "REAL"),
                input("KP", "REAL"),
                input("TR", "REAL"),
                input("TD", "REAL"),
                input("CYCLE", "TIME"),
            ],
            vec![output("XOUT", "REAL")],
        ),
        function_block(
            "RAMP",
            vec![
                input("RUN", "BOOL"),
                input("X0", "REAL"),
                input("X1", "REAL"),
                input("TR", "TIME"),
                input("CYCLE", "TIME"),
            ],
            vec![output("BUSY", "BOOL"), output("XOUT", "REAL")],
        ),
        function_block(
            "HYSTERESIS",
            vec![
                input("XIN1", "REAL"),
                input("XIN2", "REAL"),
                input("EPS", "REAL"),
            ],
            vec![output("Q", "BOOL")],
        ),
    ];

    vec![
        Category {
            name: String::from("Standard function blocks"),
            blocks: standard,
        },
        Category {
            name: String::from("Additional function blocks"),
            blocks: additional,
        },
    ]
}
