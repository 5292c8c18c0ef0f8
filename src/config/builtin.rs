//! Variant tables shipped with the binary.

use crate::core::registry::VariantRegistry;
use crate::utils::error::Result;

const HEADER: &str = "\tZ-score for % starting SCs\tZ-score for distance to edge\tZ-score for % SCs which are neutrals within two moves\tZ-score for other player's starting units within three moves of player's units or SCs";

const CLASSIC: &str = "
Sample England\t-0.38\t-0.30\t0.53\t-1.38
Sample France\t-0.38\t-0.30\t-1.52\t0.19
Sample Germany\t-0.38\t1.80\t0.53\t1.23
Sample Austria\t-0.38\t0.75\t0.53\t0.45
Sample Russia\t2.27\t-1.35\t0.53\t0.97
Sample Turkey\t-0.38\t-0.30\t0.53\t-1.12
Sample Italy\t-0.38\t-0.30\t-1.52\t-0.34
";

const MODERN2: &str = "
Sample Britain\t0.33\t-0.857142857\t0.04\t-1.070882342
Sample France\t0.33\t-0.142857143\t-0.80\t0.642529405
Sample Spain\t-1.33\t0.571428571\t-1.63\t-0.642529405
Sample Germany\t0.33\t1.285714286\t1.30\t0.642529405
Sample Italy\t0.33\t1.285714286\t1.72\t0.214176468
Sample Poland\t-1.33\t1.285714286\t0.04\t1.499235279
Sample Russia\t2.00\t-0.857142857\t-0.38\t1.070882342
Sample Ukraine\t0.33\t-0.142857143\t0.46\t0.214176468
Sample Turkey\t0.33\t-0.857142857\t0.46\t-0.642529405
Sample Egypt\t-1.33\t-1.571428571\t-1.22\t-1.927588216
";

const ANC_MED: &str = "
Sample Carthage\t0.00\t0\t-1.07\t0.5
Sample Rome\t0.00\t1.118033989\t0.27\t0.5
Sample Greece\t0.00\t1.118033989\t1.60\t0.5
Sample Egypt\t0.00\t-1.118033989\t-1.07\t0.5
Sample Persia\t0.00\t-1.118033989\t0.27\t-2
";

const WWII: &str = "
Sample Britain\t0.00\t0\t-0.177393719\t-0.8125
Sample France\t0.00\t0\t-1.655674709\t1.0625
Sample Germany\t0.00\t1.58113883\t1.300887271\t1.0625
Sample Italy\t0.00\t0\t0.709574875\t0.125
Sample Soviet Russia\t0.00\t-1.58113883\t-0.177393719\t-1.4375
";

const TREATY_OF_VERDUN: &str = "
West Francia\t0\t0\t0\t0.707106781
Middle Francia\t0\t0\t0\t-1.414213562
East Francia\t0\t0\t0\t0.707106781
";

const SOUTH_AMERICA4: &str = "
Colombia\t-0.577350269\t-0.577350269\t-1.53\t-1.677484274
Brazil\t1.732050808\t-0.577350269\t0.12\t0.762492852
Chile\t-0.577350269\t-0.577350269\t0.12\t0.15249857
Argentina\t-0.577350269\t1.732050808\t1.28\t0.762492852
";

const VARIANTS: &[(&str, u32, &str)] = &[
    ("Classic", 34, CLASSIC),
    ("Modern2", 64, MODERN2),
    ("AncMed", 34, ANC_MED),
    ("WWII", 74, WWII),
    ("TreatyOfVerdun", 15, TREATY_OF_VERDUN),
    ("SouthAmerica4", 24, SOUTH_AMERICA4),
];

pub fn builtin_registry() -> Result<VariantRegistry> {
    let mut registry = VariantRegistry::new();
    for (name, supply_centers, rows) in VARIANTS {
        let text = format!("\n{}{}", HEADER, rows);
        registry.add(name, *supply_centers, &text)?;
    }
    Ok(registry)
}
