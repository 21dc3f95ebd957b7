// Same layout as planets.txt, trimmed down
pub const SAMPLE_CATALOGUE: &str = "\
name     x      y     cargo
# inner system
Mercury  -4     1.5

Earth    0      0     1200
Mars     10     10    500
";
