//! Built-in attribute catalog for connector datasheets.
//!
//! Each attribute pairs a stable key with two instruction texts, one for
//! the web extraction path and one for the document (RAG) path, plus the
//! dictionary of values the model is asked to match against. Dimension
//! attributes carry no dictionary and expect free numeric answers.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::PinoutResult;
use crate::types::AttributeSpec;

/// Ordered collection of attribute specifications, indexed by key.
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    specs: Vec<AttributeSpec>,
    index: HashMap<String, usize>,
}

impl AttributeCatalog {
    /// Build a catalog from a list of specs. Later duplicates replace
    /// earlier ones.
    pub fn new(specs: Vec<AttributeSpec>) -> Self {
        let mut catalog = Self::default();
        for spec in specs {
            catalog.insert(spec);
        }
        catalog
    }

    /// The built-in connector attribute catalog.
    pub fn builtin() -> &'static AttributeCatalog {
        &BUILTIN
    }

    /// Add or replace a spec.
    pub fn insert(&mut self, spec: AttributeSpec) {
        match self.index.get(&spec.key) {
            Some(&position) => self.specs[position] = spec,
            None => {
                self.index.insert(spec.key.clone(), self.specs.len());
                self.specs.push(spec);
            }
        }
    }

    /// Look up an attribute by key.
    pub fn get(&self, key: &str) -> PinoutResult<&AttributeSpec> {
        self.index
            .get(key)
            .map(|&position| &self.specs[position])
            .ok_or_else(|| crate::error::PinoutError::unknown_attribute(key))
    }

    /// Whether the catalog defines the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All specs in catalog order.
    pub fn all(&self) -> &[AttributeSpec] {
        &self.specs
    }

    /// Attribute keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.key.as_str())
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn spec(key: &str, web: &str, pdf: &str, values: &[&str]) -> AttributeSpec {
    AttributeSpec::new(
        key,
        web,
        pdf,
        values.iter().map(|v| v.to_string()).collect(),
    )
}

static BUILTIN: Lazy<AttributeCatalog> = Lazy::new(|| {
    AttributeCatalog::new(vec![
        // Material properties
        spec(
            "Material Filling",
            MATERIAL_FILLING_WEB,
            MATERIAL_FILLING_PDF,
            &["none", "GF", "CF", "(GB+GF)"],
        ),
        spec(
            "Material Name",
            MATERIAL_NAME_WEB,
            MATERIAL_NAME_PDF,
            &[
                "PA66",
                "PBT",
                "PA",
                "Silicone Rubber",
                "PA6",
                "Plastics",
                "PP",
                "PA+SPS",
                "PA12",
                "PET",
                "PA66+PA6",
                "PC",
            ],
        ),
        // Physical and mechanical attributes
        spec(
            "Pull-To-Seat",
            PULL_TO_SEAT_WEB,
            PULL_TO_SEAT_PDF,
            &["No", "Yes"],
        ),
        spec("Gender", GENDER_WEB, GENDER_PDF, &["female", "male"]),
        spec("Height [MM]", HEIGHT_MM_WEB, HEIGHT_MM_PDF, &[]),
        spec("Length [MM]", LENGTH_MM_WEB, LENGTH_MM_PDF, &[]),
        spec("Width [MM]", WIDTH_MM_WEB, WIDTH_MM_PDF, &[]),
        spec(
            "Number Of Cavities",
            NUMBER_OF_CAVITIES_WEB,
            NUMBER_OF_CAVITIES_PDF,
            &[
                "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "12", "13", "14", "16", "18",
                "19", "20", "23", "24", "26", "27", "30", "31", "32", "35", "38", "46", "47", "52",
                "53", "60", "63", "64", "136",
            ],
        ),
        spec(
            "Number Of Rows",
            NUMBER_OF_ROWS_WEB,
            NUMBER_OF_ROWS_PDF,
            &["0", "1", "2", "4", "7", "9", "24"],
        ),
        spec(
            "Mechanical Coding",
            MECHANICAL_CODING_WEB,
            MECHANICAL_CODING_PDF,
            &[
                "None",
                "A",
                "B",
                "C",
                "D",
                "E",
                "F",
                "G",
                "I",
                "Z",
                "1",
                "2",
                "5",
                "III",
                "No naming",
                "Neutral",
                "X",
                "II",
                "V",
            ],
        ),
        // Colour and appearance
        spec(
            "Colour",
            COLOUR_WEB,
            COLOUR_PDF,
            &[
                "000 bk", "101 nt", "111 ye", "222 og", "333 rd", "353 pk", "444 vt", "555 bu",
                "666 gn", "777 gy", "888 bn", "999 wh",
            ],
        ),
        spec(
            "Colour Coding",
            COLOUR_CODING_WEB,
            COLOUR_CODING_PDF,
            &[
                "None", "Red", "Blue", "Orange", "Natural", "Black", "Pink", "White", "Violet",
            ],
        ),
        // Sealing and environmental
        spec(
            "Max. Working Temperature [°C]",
            MAX_WORKING_TEMPERATURE_WEB,
            WORKING_TEMPERATURE_PDF,
            &[
                "40.0000", "80.0000", "85.0000", "100.000", "105.000", "120.000", "125.000",
                "130.000", "135", "140.000", "150.000", "155.000", "-1",
            ],
        ),
        spec(
            "Min. Working Temperature [°C]",
            MIN_WORKING_TEMPERATURE_WEB,
            WORKING_TEMPERATURE_PDF,
            &["-65.0000", "-55.0000", "-40.0000", "-30.0000", "-20.0000", "-1"],
        ),
        spec(
            "Housing Seal",
            HOUSING_SEAL_WEB,
            HOUSING_SEAL_PDF,
            &["none", "interface seal", "radial seal"],
        ),
        spec(
            "Wire Seal",
            WIRE_SEAL_WEB,
            WIRE_SEAL_PDF,
            &[
                "none",
                "single wire seal",
                "Mat seal",
                "Silicone family seal",
                "family seal",
            ],
        ),
        spec("Sealing", SEALING_WEB, SEALING_PDF, &["unsealed", "sealed"]),
        spec(
            "Sealing Class",
            SEALING_CLASS_WEB,
            SEALING_CLASS_PDF,
            &[
                "IPx0",
                "IPx7",
                "IPx9K",
                "IPx6",
                "IPx4",
                "IPx8",
                "IPx5",
                "not defined",
                "IPx9K,IPx6",
                "IPx9K,IPx7",
                "IPx9K,IPx9K",
                "IPx6,IPx7",
                "IPx7,IPx9K",
                "IPx7,IPx6",
            ],
        ),
        // Terminals and connections
        spec(
            "Contact Systems",
            CONTACT_SYSTEMS_WEB,
            CONTACT_SYSTEMS_PDF,
            &[
                "TAB 1.8",
                "0.64",
                "MCP 2.8",
                "MLK 1.2",
                "MQS 0.64",
                "SLK 2.8",
                "HF",
                "070",
                "GT 2.8",
                "MTS 0.64",
                "NG 1.8",
                "2.3",
                "BOX 2.8",
                "QKK 2.8",
                "RH 0.64",
                "CTS 1.5",
                "NanoMQS",
                "MCON 1.2",
                "HSD",
                "RK",
                "YESC 1.5",
                "MCP 1.5K",
                "HCT4",
                "HPCS 2.8",
                "2.8",
                "040",
                "SPT 4.8",
                "090 HW",
                "AMPSEAL",
                "MOD",
                "ST",
                "CONI1 1.6",
                "Econoseal 1.5",
                "MCP 1.2",
                "TAB 1.2",
                "FASTON 6.3",
                "M800",
                "GET 0.64",
                "MATE-N-LOK",
                "025 TH",
                "MPQ 2.8",
                "MAK 8",
                "MAK 2.8",
                "TAB 1.5",
                "DIA 3.6",
                "DIA 9.0",
                "DIA 6.0",
                "DIA 3.0",
                "TAB 1.6",
                "QKK 4.8",
                "FS 2.8",
                "FS 1.2",
                "US 2.8x0.8",
                "TAB 2.8",
                "TAB 4.8",
                "TAB 9.5",
                "3.5",
                "MCP 6.3",
                "MX 1.5",
                "1.5",
                "1.2",
                "QKK 1.2",
                "MLK 1.2 Sm",
                "MCP 1.5",
                "MQS 1.5",
                "MQS 0.64 CB",
            ],
        ),
        spec(
            "Terminal Position Assurance",
            TERMINAL_POSITION_ASSURANCE_WEB,
            TERMINAL_POSITION_ASSURANCE_PDF,
            &["None", "1", "2", "undefined_to do not use"],
        ),
        spec(
            "Connector Position Assurance",
            CONNECTOR_POSITION_ASSURANCE_WEB,
            CONNECTOR_POSITION_ASSURANCE_PDF,
            &["No", "Yes"],
        ),
        spec(
            "Name Of Closed Cavities",
            CLOSED_CAVITIES_WEB,
            CLOSED_CAVITIES_PDF,
            &["none", "2,3", "4-7,14-17", "4-5,10,14-15,17,19"],
        ),
        // Assembly and type
        spec(
            "Pre-assembled",
            PRE_ASSEMBLED_WEB,
            PRE_ASSEMBLED_PDF,
            &["No", "Yes"],
        ),
        spec(
            "Type Of Connector",
            CONNECTOR_TYPE_WEB,
            CONNECTOR_TYPE_PDF,
            &[
                "Standard",
                "Antenna",
                "Contact Carrier",
                "HSD / USB / HDMI",
                "Airbag / Squib",
                "IDC",
                "Bulb holder",
                "Relay holder",
            ],
        ),
        spec("Set/Kit", SET_KIT_WEB, SET_KIT_PDF, &["No", "Yes"]),
        // Specialized attributes
        spec(
            "HV Qualified",
            HV_QUALIFIED_WEB,
            HV_QUALIFIED_PDF,
            &["No", "Yes"],
        ),
    ])
});

// Document-path instruction texts. Dictionary-based matching, the model
// picks the best match from the available values.

const MATERIAL_FILLING_PDF: &str = r#"Find the best match for Material Filling from the document context.

Available values: ["none", "GF", "CF", "(GB+GF)"]

Instructions:
- Look for material filling additives in the document
- Common additives: GF (glass-fiber), GB (glass-balls), MF (mineral-fiber), T (talcum)
- Match to the closest available value
- If no fillers mentioned, use "none"
- If multiple additives, use "(GB+GF)" format if applicable

Output format: {"Material Filling": "best_match_from_dictionary"}"#;

const MATERIAL_NAME_PDF: &str = r#"Find the best match for Material Name from the document context.

Available values: ["PA66", "PBT", "PA", "Silicone Rubber", "PA6", "Plastics", "PP", "PA+SPS", "PA12", "PET", "PA66+PA6", "PC"]

Instructions:
- Look for the primary polymer material in the document
- Remove additives/fillers from composite names (PA66-GF30 → PA66)
- Match to the closest available value
- For blends, use combined format if available (PA66+PA6)
- If uncertain, use "NOT FOUND"

Output format: {"Material Name": "best_match_from_dictionary"}"#;

const PULL_TO_SEAT_PDF: &str = r#"Find the best match for Pull-To-Seat requirement from the document context.

Available values: ["No", "Yes"]

Instructions:
- Look for pull-to-seat, pull-back, or tug-lock mechanisms
- Check for pre-inserted terminals or tool-free insertion
- If pull action is required for terminal seating → "Yes"
- If no pull action or alternative methods → "No"

Output format: {"Pull-To-Seat": "best_match_from_dictionary"}"#;

const GENDER_PDF: &str = r#"Find the best match for Gender from the document context.

Available values: ["female", "male"]

Instructions:
- Look for connector gender indicators: "Plug", "Header" → male
- "Receptacle", "Socket" → female
- Check internal contact types: pins → male function, sockets → female function
- Manufacturer nomenclature takes priority over internal contacts
- If unclear, use "NOT FOUND"

Output format: {"Gender": "best_match_from_dictionary"}"#;

const HEIGHT_MM_PDF: &str = r#"Find the connector height in millimeters from the document context.

Instructions:
- Look for height measurements in Y-axis or total height
- Include CPA/TPA locked position adjustments if specified
- For round connectors, use diameter as height
- Return numerical value or "999" if not found

Output format: {"Height [MM]": "numerical_value_or_999"}"#;

const LENGTH_MM_PDF: &str = r#"Find the connector length in millimeters from the document context.

Instructions:
- Look for length measurements in Z-axis from mating face to rear
- Include CPA/TPA locked position adjustments if specified
- Return numerical value or "999" if not found

Output format: {"Length [MM]": "numerical_value_or_999"}"#;

const WIDTH_MM_PDF: &str = r#"Find the connector width in millimeters from the document context.

Instructions:
- Look for width measurements in X-axis
- For round connectors, use diameter
- Include TPA/CPA locked position adjustments if specified
- Return numerical value or "NOT FOUND" if not found

Output format: {"Width [MM]": "numerical_value_or_NOT_FOUND"}"#;

const NUMBER_OF_CAVITIES_PDF: &str = r#"Find the best match for Number of Cavities from the document context.

Available values: ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "12", "13", "14", "16", "18", "19", "20", "23", "24", "26", "27", "30", "31", "32", "35", "38", "46", "47", "52", "53", "60", "63", "64", "136"]

Instructions:
- Look for cavity count, position count, or "way" indicators
- Check part number suffixes (-2C, -4P, -6W)
- Match to the closest available value
- If not found, use "999"

Output format: {"Number of Cavities": "best_match_from_dictionary"}"#;

const NUMBER_OF_ROWS_PDF: &str = r#"Find the best match for Number of Rows from the document context.

Available values: ["0", "1", "2", "4", "7", "9", "24"]

Instructions:
- Look for row-based structure descriptions
- Check for grid arrangements (e.g., 4x6 grid → 4 rows)
- Match to the closest available value
- If no row structure, use "0"

Output format: {"Number of Rows": "best_match_from_dictionary"}"#;

const MECHANICAL_CODING_PDF: &str = r#"Find the best match for Mechanical Coding from the document context.

Available values: ["None", "A", "B", "C", "D", "E", "F", "G", "I", "Z", "1", "2", "5", "III", "No naming", "Neutral", "X", "II", "V"]

Instructions:
- Look for explicit coding letters: "Coding A", "Coding B", etc.
- Check for "neutral coding", "0-position", "universal coding"
- Look for "no mechanical coding", "not keyed", "not polarized"
- Match to the closest available value
- If not found, use "9999"

Output format: {"Mechanical Coding": "best_match_from_dictionary"}"#;

const COLOUR_PDF: &str = r#"Find the best match for Colour from the document context.

Available values: ["000 bk", "101 nt", "111 ye", "222 og", "333 rd", "353 pk", "444 vt", "555 bu", "666 gn", "777 gy", "888 bn", "999 wh"]

Instructions:
- Look for color descriptions or color codes
- Match color names to codes: black→"000 bk", natural→"101 nt", yellow→"111 ye", etc.
- For multi-color designs, use "multi"
- If not found, use "NOT FOUND"

Output format: {"Colour": "best_match_from_dictionary"}"#;

const COLOUR_CODING_PDF: &str = r#"Find the best match for Colour Coding from the document context.

Available values: ["None", "Red", "Blue", "Orange", "Natural", "Black", "Pink", "White", "Violet"]

Instructions:
- Look for color-coded mechanical coding components (CPA, TPA, coding keys)
- Check if coding components differ from housing color
- Look for "X denotes variant Y" statements
- If no color coding or all components match housing → "None"
- Match to the closest available color name

Output format: {"Colour Coding": "best_match_from_dictionary"}"#;

const WORKING_TEMPERATURE_PDF: &str = r#"Find the working temperature range from the document context.

Available Max values: ["40.0000", "80.0000", "85.0000", "100.000", "105.000", "120.000", "125.000", "130.000", "135", "140.000", "150.000", "155.000", "-1"]
Available Min values: ["-65.0000", "-55.0000", "-40.0000", "-30.0000", "-20.0000", "-1"]

Instructions:
- Look for temperature ranges (e.g., "-40°C to 125°C")
- Extract max and min temperatures
- Match to closest available values
- If not found, use "-1" for missing value

Output format: {"Working Temperature": "/max_value/min_value"}"#;

const HOUSING_SEAL_PDF: &str = r#"Find the best match for Housing Seal from the document context.

Available values: ["none", "interface seal", "radial seal"]

Instructions:
- Look for "Radial Seal", "Interface Seal", or "Ring Seal"
- Check if seals refer to connector-to-counterpart interface
- If no sealing mentioned → "none"
- "Ring Seal" maps to "radial seal"

Output format: {"Housing Seal": "best_match_from_dictionary"}"#;

const WIRE_SEAL_PDF: &str = r#"Find the best match for Wire Seal from the document context.

Available values: ["none", "single wire seal", "Mat seal", "Silicone family seal", "family seal"]

Instructions:
- Look for individual wire seals per cavity → "single wire seal"
- Look for unified sealing element → "Mat seal"
- Look for "gel seal", "silicone family seal" → "Silicone family seal"
- If no sealing mentioned → "none"
- If not found, use "9999"

Output format: {"Wire Seal": "best_match_from_dictionary"}"#;

const SEALING_PDF: &str = r#"Find the best match for Sealing status from the document context.

Available values: ["unsealed", "sealed"]

Instructions:
- Look for IP codes: IPx0 → "unsealed", IPx4+ → "sealed"
- Check for "waterproof", "dustproof", "sealed", "gasket"
- Check for "unsealed", "no sealing"
- If not found, use "NOT FOUND"

Output format: {"Sealing": "best_match_from_dictionary"}"#;

const SEALING_CLASS_PDF: &str = r#"Find the Sealing Class from the document context.

Available values: ["IPx0", "IPx7", "IPx9K", "IPx6", "IPx4", "IPx8", "IPx5", "not defined", "IPx9K,IPx6", "IPx9K,IPx7", "IPx9K,IPx9K", "IPx6,IPx7", "IPx7,IPx9K", "IPx7,IPx6"]

Instructions:
- Look for IP codes in the document
- Match exact IP codes found
- For multiple codes, use combined format if available
- If no IP rating → "not defined"

Output format: {"Sealing Class": "best_match_from_dictionary"}"#;

const CONTACT_SYSTEMS_PDF: &str = r#"Find the best match for Contact Systems from the document context.

Available values: ["TAB 1.8", "0.64", "MCP 2.8", "MLK 1.2", "MQS 0.64", "SLK 2.8", "HF", "070", "GT 2.8", "MTS 0.64", "NG 1.8", "2.3", "BOX 2.8", "QKK 2.8", "RH 0.64", "CTS 1.5", "NanoMQS", "MCON 1.2", "HSD", "RK", "YESC 1.5", "MCP 1.5K", "HCT4", "HPCS 2.8", "2.8", "040", "SPT 4.8", "090 HW", "AMPSEAL", "MOD", "ST", "CONI1 1.6", "Econoseal 1.5", "MCP 1.2", "TAB 1.2", "FASTON 6.3", "M800", "GET 0.64", "MATE-N-LOK", "025 TH", "MPQ 2.8", "MAK 8", "MAK 2.8", "TAB 1.5", "DIA 3.6", "DIA 9.0", "DIA 6.0", "DIA 3.0", "TAB 1.6", "QKK 4.8", "FS 2.8", "FS 1.2", "US 2.8x0.8", "TAB 2.8", "TAB 4.8", "TAB 9.5", "3.5", "MCP 6.3", "MX 1.5", "1.5", "1.2", "QKK 1.2", "MLK 1.2 Sm", "MCP 1.5", "MQS 1.5", "MQS 0.64 CB"]

Instructions:
- Look for contact system families mentioned
- Check for terminal part numbers that map to systems
- Match to exact system names found
- For multiple systems, use comma-separated list

Output format: {"Contact Systems": "best_match_from_dictionary"}"#;

const TERMINAL_POSITION_ASSURANCE_PDF: &str = r#"Find the best match for Terminal Position Assurance from the document context.

Available values: ["None", "1", "2", "undefined_to do not use"]

Instructions:
- Look for "TPA", "Terminal Position Assurance", "Anti-Backout"
- Check if TPA is preassembled (not requiring assembly)
- Count number of TPAs if multiple
- If assembly required → "0"
- If no TPA → "None"

Output format: {"Terminal Position Assurance": "best_match_from_dictionary"}"#;

const CONNECTOR_POSITION_ASSURANCE_PDF: &str = r#"Find the best match for Connector Position Assurance from the document context.

Available values: ["No", "Yes"]

Instructions:
- Look for "CPA", "Connector Position Assurance", "Anti-Backout"
- Check for secondary locking mechanisms
- If CPA mentioned → "Yes"
- If no CPA or explicit denial → "No"

Output format: {"Connector Position Assurance": "best_match_from_dictionary"}"#;

const CLOSED_CAVITIES_PDF: &str = r#"Find the best match for Name of Closed Cavities from the document context.

Available values: ["none", "2,3", "4-7,14-17", "4-5,10,14-15,17,19"]

Instructions:
- Look for closed cavity numbers or ranges
- Check for "blocked positions", "plugged cavities"
- If all cavities open → "none"
- If specific numbers mentioned, match to available patterns
- If not found, use "none"

Output format: {"Name of Closed Cavities": "best_match_from_dictionary"}"#;

const PRE_ASSEMBLED_PDF: &str = r#"Find the best match for Pre-assembled status from the document context.

Available values: ["No", "Yes"]

Instructions:
- Look for "delivered as assembly", "requires disassembly"
- Check if full connector assembly needs breakdown for production
- If disassembly required → "Yes"
- If components preassembled but no full disassembly needed → "No"
- If not found, use "NOT FOUND"

Output format: {"Pre-assembled": "best_match_from_dictionary"}"#;

const CONNECTOR_TYPE_PDF: &str = r#"Find the best match for Type of Connector from the document context.

Available values: ["Standard", "Antenna", "Contact Carrier", "HSD / USB / HDMI", "Airbag / Squib", "IDC", "Bulb holder", "Relay holder"]

Instructions:
- Look for explicit type mentions: "HSD", "USB", "Antenna", etc.
- Check application context: relay holder, bulb holder, etc.
- For general-purpose connectors → "Standard"
- Match to closest available type

Output format: {"Type of Connector": "best_match_from_dictionary"}"#;

const SET_KIT_PDF: &str = r#"Find the best match for Set/Kit status from the document context.

Available values: ["No", "Yes"]

Instructions:
- Look for "Set", "Kit" explicitly mentioned
- Check if accessories have separate part numbers → "No"
- Check if accessories included under same part number → "Yes"
- If not found, use "NOT FOUND"

Output format: {"Set/Kit": "best_match_from_dictionary"}"#;

const HV_QUALIFIED_PDF: &str = r#"Find the best match for HV Qualified status from the document context.

Available values: ["No", "Yes"]

Instructions:
- Look for voltage > 60V and HV context
- Check for "HV-qualified", "HV-certified", "HV-connector"
- Check for orange color and HV safety features
- If ≤60V → "No"
- If >60V with HV context → "Yes"

Output format: {"HV Qualified": "best_match_from_dictionary"}"#;

// Web-path instruction texts. Definition-style, the model answers from
// cleaned scraped website data.

const MATERIAL_FILLING_WEB: &str = r#"Material filling describes additives added to the base material in order to influence the mechanical material characteristics. Most common additives are GF (glass-fiber), GB (glass-balls), MF (mineral-fiber) and T (talcum)."#;

const MATERIAL_NAME_WEB: &str = r#"Extract primary polymer material using this reasoning chain:
    STEP 1: MATERIAL IDENTIFICATION
    - Scan for:
      ✓ Explicit polymer declarations (PA66, PBT, etc.)
      ✓ Composite notations (PA6-GF30, PPS-MF15)
      ✓ Additive markers (GF, GB, MF, T)
      ✓ Weight percentages (PA(70%), PBT(30%))

    STEP 2: BASE MATERIAL ISOLATION
    - Remove additives/fillers from composite names:
      PA66-GF30 → PA66
      LCP-MF45 → LCP
    - If additives-only mentioned (GF40):
      → Check context for base polymer
      → Else: NOT FOUND

    STEP 3: WEIGHT HIERARCHY ANALYSIS
    - Compare numerical weights when present:
      PA66(55%)/PA6(45%) → PA66
    - No weights? Use declaration order:
      "Primary material: PPS, Secondary: LCP" → PPS

    STEP 4: SPECIFICITY RESOLUTION
    - Prefer exact grades:
      PA66 > PA6 > PA
      PPSU > PPS
    - Handle generics:
      "Thermoplastic" + GF → PA
      "High-temp polymer" → PPS

    STEP 5: VALIDATION
    - Confirm single material meets ALL:
      1. Base polymer identification
      2. Weight/declaration priority
      3. Specificity requirements
    - Uncertain? → NOT FOUND

    **Examples:**
    - **"Connector: PA6-GF30 (60% resin)"**
      → REASONING: [Step1 ✓] PA6+GF → [Step2 ✓] PA6 → [Step3 ✓] 60% → [Step4 ✓] Specific grade → [Step5 ✓] Validated
      → MATERIAL NAME: **PA6**

    - **"Housing: GF40 Polymer"**
      → REASONING: [Step1 ✓] GF additive → [Step2 ✗] No base polymer → [Step5 ✗] Uncertain
      → MATERIAL NAME: **NOT FOUND**

    **Output format:**
    MATERIAL NAME: [UPPERCASE]"#;

const PULL_TO_SEAT_WEB: &str = r#"Yes, if the connector is designed to assemble the wires/terminals with pull-to-seat."#;

const GENDER_WEB: &str = r#"Male or Female or Unisex (both kind of terminal in the same cavity) or Hybrid (different cavities for both kind of terminals in the same connector)"#;

const HEIGHT_MM_WEB: &str = r#"Height is measured in direction Y.
Total height of the connector (in millimeter) according to the supplier drawing. In some rare cases the height is “longer” then the width.
The dimension is measured as if the connector is assembled. When the connector includes a TPA/CPA, it is the dimension in locked position."#;

const LENGTH_MM_WEB: &str = r#"Length is measured in direction Z.
Total length of the connector (in millimeter) according to the supplier drawing. Length is measured dimension from mating face (plug-in to counterpart) to back (wire/cable).
The dimension is measured as if the connector is assembled. When the connector includes a TPA/CPA, it is the dimension in locked position."#;

const WIDTH_MM_WEB: &str = r#"Width is measured in direction X.
Total width of the connector (in millimeter) according to the supplier drawing. In some rare cases the width is “shorter” then the height.
The dimension is measured as if the connector is assembled. When the connector includes a TPA/CPA, it is the dimension in locked position."#;

const NUMBER_OF_CAVITIES_WEB: &str = r#"For connectors the cavities where terminals will be plugged have to be count.
The number of cavities is the highest number that is printed/defined on the housing itself. In most cases, the number of cavities is also noted in the title block (often in a corner) of the drawing."#;

const NUMBER_OF_ROWS_WEB: &str = r#"Determine the number of rows"#;

const MECHANICAL_CODING_WEB: &str = r#"A mechanical coding is designed at the plugged connector and its counterpart. The coding is used to avoid failures during pushing process.
The location of the tongue and groove at the plastic parts are varying with the different mechanical coding (A/B/C/D).
Often the coding is mentioned on the drawing, but sometimes not and then it is only drawn. In this case, we use the value: “no naming”.
If all available coding of a connector family are fitting in a universal coded (= neutral or 0 coding) connector, the universal connector has the coding value = Z.
If the connector has no coding, the value = none."#;

const COLOUR_WEB: &str = r#"For assembled parts, the dominant colour of the complete assembly should be filled in.
For a single part connector, the colour of the housing has to be selected.
In case of multi-colour connectors, without a dominant colour, enter the colour value ‘multi'."#;

const COLOUR_CODING_WEB: &str = r#"Determine the Color Coding if found if not its not found"#;

const MAX_WORKING_TEMPERATURE_WEB: &str = r#"Max. Working Temperature in °C according the drawing/datasheet. If no value is available, please enter the value 999. max range temperature"#;

const MIN_WORKING_TEMPERATURE_WEB: &str = r#"Min. Working Temperature in °C according the drawing/datasheet. If no value is available, please enter the value 999. min range temperature"#;

const HOUSING_SEAL_WEB: &str = r#"The type of sealing between the connector and its counterpart: Radial Seal / Interface seal."#;

const WIRE_SEAL_WEB: &str = r#"Wire seal describes the sealing of the space between wire and cavity wall, when a terminal is fitted in a cavity. There are different possibilities for sealing available: Single wire seal, Injected, Mat seal (includes "gel family seal" and "silicone family seal"), None."#;

const SEALING_WEB: &str = r#"Determine sealing status using this reasoning chain:

    STEP 1: IP CODE EXTRACTION
    - Scan for ISO 20653/IP codes:
      ✓ Valid codes: IPx0, IPx4, IPx4K, IPx5, IPx6, IPx6K, IPx7, IPx8, IPx9, IPx9K
      ✗ Ignore: IPx1, IPx2, IPx3

    STEP 2: IP-BASED CLASSIFICATION
    - If valid IP codes found:
      → IPx0 → **Unsealed**
      → Any other valid code → **Sealed**
    - If multiple IP codes:
      → Use highest protection level (e.g., IPx9K > IPx7)

    STEP 3: FUNCTIONAL SEALING INDICATORS
    - If no valid IP codes:
      ✓ Check for sealing features:
        * "Waterproof"/"dustproof"
        * "Sealed"/"gasket"/"O-ring"
        * "Environmental protection"
      ✓ Check for explicit negatives:
        * "Unsealed"/"no sealing"

    STEP 4: CONFLICT RESOLUTION
    - Priority hierarchy:
      1. IP codes (STEP 2)
      2. Explicit functional terms (STEP 3)
      3. Default to NOT FOUND

    STEP 5: FINAL VALIDATION
    - **Sealed** requires:
      ✓ IP code ≥IPx4 OR
      ✓ Functional sealing description
    - **Unsealed** requires:
      ✓ IPx0 OR
      ✓ Explicit lack of sealing

    Examples:
    "IPx9K-rated for high-pressure washdown"
    → REASONING: [Step1] IPx9K → [Step2] Sealed
    → SEALING: Sealed

    "No IP rating but includes silicone gasket"
    → REASONING: [Step1] No IP → [Step3] Gasket → Sealed
    → SEALING: Sealed

    "IPx0 connector with 'dust-resistant' claim"
    → REASONING: [Step1] IPx0 → [Step4] Overrides description → Unsealed
    → SEALING: Unsealed

    Output format:
    SEALING: [Sealed/Unsealed/Not Found]"#;

const SEALING_CLASS_WEB: &str = r#"Determine the IP sealing class"#;

const CONTACT_SYSTEMS_WEB: &str = r#"Identify approved contact systems using this reasoning chain:

    STEP 1: SOURCE IDENTIFICATION
    - Scan for:
      ✓ Explicit system families (MQS, MLK, SLK, etc.)
      ✓ Terminal part numbers (123-4567, XW3D-XXXX-XX)
      ✓ Manufacturer approval statements:
        * "Approved for use with..."
        * "Compatible contact systems:"
        * "Recommended mating system"

    STEP 2: MANUFACTURER PRIORITIZATION
    - Verify mentions are supplier-specified:
      ✓ Direct manufacturer recommendations
      ✗ Customer-specific part numbers
      ✗ Generic terminal references

    STEP 3: SYSTEM RESOLUTION HIERARCHY
    1. Primary: Explicit family mentions (MQS 0.64)
    2. Secondary: Part number mapping:
       - Cross-reference with manufacturer catalogs
       - Match patterns (e.g., 928321-1 → TE MCP 1.2)
    3. Reject unidentifiable part numbers

    STEP 4: MULTI-SYSTEM VALIDATION
    - Check for:
      ✓ Multiple approval statements
      ✓ Hybrid connector systems
      ✓ Generation variants (MQS Gen2 vs Gen3)
    - Require explicit documentation for each system

    STEP 5: STANDARDIZATION CHECK
    - Convert to manufacturer nomenclature:
      "Micro Quadlock" → MQS
      "H-MTD" → HMTD
    - Maintain versioning: MLK 1.2 ≠ MLK 2.0

    Examples:
    "Approved systems: MQS 0.64 & SLK 2.8 (P/N 345-789)"
    → REASONING: [Step1] MQS/SLK explicit → [Step2] Approved → [Step5] Standardized
    → CONTACT SYSTEMS: MQS 0.64,SLK 2.8

    "Terminals: 927356-1 (MCP series)"
    → REASONING: [Step1] Part number → [Step3] Mapped to MCP → [Step2] Implicit approval
    → CONTACT SYSTEMS: MCP

    "Compatible with various 2.8mm systems"
    → REASONING: [Step1] Vague → [Step5] Non-specific → [Final] NOT FOUND
    → CONTACT SYSTEMS: NOT FOUND

    Output format:
    CONTACT SYSTEMS: [system1,system2,.../Not Found]"#;

const TERMINAL_POSITION_ASSURANCE_WEB: &str = r#"Indicates the number of available TPAs, which are content of the delivered connector (TPAs preassembled). If a separate TPA or more than one, regularly with their own part number, has to be assembled at LEONI production, the amount is given within HD (Housing Definition). In such cases, then here "0" has to be filled.
To guarantee a further locking of a terminal in a connector - the firstly/primary locking is done by the lances at the terminals or at the housings - a secondary locking is provided, the terminal position assurance = TPA. Sometimes it is named 'Anti-Backout'."#;

const CONNECTOR_POSITION_ASSURANCE_WEB: &str = r#"CPA is an additional protection to ensure, that the connector is placed correctly to the counterpart and that the connector won´t be removed unintentional. Sometimes it's named 'Anti-Backout'."#;

const CLOSED_CAVITIES_WEB: &str = r#"Here the number of the cavities, which are closed, have to listed. If all cavities are open or the closed cavities haven´t numerations, 'none' has to be entered."#;

const PRE_ASSEMBLED_WEB: &str = r#"This attribute defines if the connector is delivered as an assembly, which has to be disassembled in our production in order to use it.
Connectors with a preassembled TPA and/or CPA and/or lever and/or etc., which haven´t to be disassembled in our production, get the value "No".
If the connector must be disassembled in our production before we can use it, get the value "Yes"."#;

const CONNECTOR_TYPE_WEB: &str = r#"Determine the **Type of Connector** using this reasoning chain:

    STEP 1: EXPLICIT TYPE IDENTIFICATION
    - Scan for exact terms:
      ✓ "Standard"
      ✓ "Contact Carrier"
      ✓ "Actuator"
      ✓ Other documented types (e.g., "Sensor", "Power Distribution")

    STEP 2: CONTEXTUAL INFERENCE
    - If no explicit type:
      ✓ Analyze application context:
        * "Modular contact housing" → **Contact Carrier**
        * "Used in mechanical actuation systems" → **Actuator**
        * "General-purpose" / No special features → **Standard**
      ✓ Map keywords to types:
        * "Carrier," "module holder" → Contact Carrier
        * "Movement," "lever-operated" → Actuator
        * "Universal," "base model" → Standard

    STEP 3: APPLICATION VALIDATION
    - Verify inferred type aligns with:
      ✓ Connector design (e.g., Contact Carriers have modular slots)
      ✓ System integration described (e.g., Actuators link to moving parts)
      ✗ Reject mismatches (e.g., "Actuator" term in a static assembly)

    STEP 4: DEFAULT RESOLUTION
    - No explicit/inferred type? → **NOT FOUND**
    - Generic connector without specialized use? → **Standard**

    Examples:
    "Modular Contact Carrier (P/N CC-234)"
    → REASONING: [Step1] Explicit → **Contact Carrier**
    → TYPE OF CONNECTOR: Contact Carrier

    "Connector for actuator assembly in robotic arm"
    → REASONING: [Step2] "actuator" context → **Actuator**
    → TYPE OF CONNECTOR: Actuator

    "General automotive wiring connector"
    → REASONING: [Step4] Generic → **Standard**
    → TYPE OF CONNECTOR: Standard

    "High-voltage junction module"
    → REASONING: [Step1-2] No matches → [Step4] **NOT FOUND**
    → TYPE OF CONNECTOR: NOT FOUND

    Output format:
    TYPE OF CONNECTOR: [Standard/Contact Carrier/Actuator/Other/Not Found]"#;

const SET_KIT_WEB: &str = r#"If a connector is delivered as a 'Set/Kit' with one LEONI part number, means connector with separate accessories (cover, lever, TPA,…) which aren´t preassembled, then it is Yes. All loose pieces are handled with the same Leoni part number.
If all loose pieces have their own LEONI part number, then it is No."#;

const HV_QUALIFIED_WEB: &str = r#"This attribute is set to "Yes" ONLY when the documentation indicates this property, or the parts are used in an HV-connector or an HV-assembly. Otherwise it´s No. HV is specified as the range greater than 60 V."#;
