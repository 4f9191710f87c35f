//! Static station table.
//!
//! Metro stations (plus a handful of commuter-rail interchanges riders
//! search for) and their upstream site identifiers.

/// Canonical `(display name, site id)` pairs, in network order.
pub(super) const STATIONS: &[(&str, &str)] = &[
    ("T-Centralen", "9001"),
    ("Gamla stan", "9193"),
    ("Slussen", "9192"),
    ("Mariatorget", "9297"),
    ("Medborgarplatsen", "9191"),
    ("Skanstull", "9190"),
    ("Gullmarsplan", "9189"),
    ("Skärmarbrink", "9188"),
    ("Blåsut", "9187"),
    ("Sandsborg", "9186"),
    ("Skogskyrkogården", "9185"),
    ("Tallkrogen", "9184"),
    ("Gubbängen", "9183"),
    ("Hökarängen", "9182"),
    ("Farsta", "9181"),
    ("Farsta strand", "9180"),
    ("Hammarbyhöjden", "9179"),
    ("Björkhagen", "9178"),
    ("Kärrtorp", "9177"),
    ("Bagarmossen", "9176"),
    ("Skarpnäck", "9140"),
    ("Östermalmstorg", "9194"),
    ("Stadion", "9195"),
    ("Tekniska högskolan", "9196"),
    ("Universitetet", "9197"),
    ("Bergshamra", "9198"),
    ("Danderyds sjukhus", "9199"),
    ("Mörby centrum", "9200"),
    ("Ropsten", "9201"),
    ("Gärdet", "9202"),
    ("Karlaplan", "9203"),
    ("Norsborg", "9204"),
    ("Hallunda", "9205"),
    ("Alby", "9206"),
    ("Fittja", "9207"),
    ("Masmo", "9208"),
    ("Vårberg", "9209"),
    ("Vårby gård", "9210"),
    ("Aspudden", "9211"),
    ("Örnsberg", "9212"),
    ("Axelsberg", "9213"),
    ("Mälarhöjden", "9214"),
    ("Bredäng", "9215"),
    ("Sätra", "9216"),
    ("Skärholmen", "9217"),
    ("Vårby", "9218"),
    ("Fruängen", "9219"),
    ("Västertorp", "9220"),
    ("Hägerstensåsen", "9262"),
    ("Telefonplan", "9221"),
    ("Midsommarkransen", "9222"),
    ("Globen", "9223"),
    ("Enskede gård", "9224"),
    ("Hässelby strand", "9100"),
    ("Hässelby gård", "9101"),
    ("Johannelund", "9102"),
    ("Vällingby", "9103"),
    ("Råcksta", "9104"),
    ("Blackeberg", "9105"),
    ("Islandstorget", "9106"),
    ("Ängbyplan", "9107"),
    ("Åkeshov", "9108"),
    ("Brommaplan", "9109"),
    ("Abrahamsberg", "9110"),
    ("Stora mossen", "9111"),
    ("Alvik", "9112"),
    ("Kristineberg", "9113"),
    ("Thorildsplan", "9114"),
    ("Fridhemsplan", "9115"),
    ("Odenplan", "9117"),
    ("Rådmansgatan", "9118"),
    ("Hötorget", "9119"),
    ("Hagsätra", "9225"),
    ("Rågsved", "9226"),
    ("Huddinge", "9227"),
    ("Flemingsberg", "9228"),
    ("Tullinge", "9229"),
    ("Tumba", "9230"),
    ("Rönninge", "9231"),
    ("Österhaninge", "9232"),
    ("Handen", "9233"),
    ("Vendelsö", "9234"),
    ("Trångsund", "9235"),
    ("Skogås", "9236"),
    ("Kungsträdgården", "9237"),
    ("Rådhuset", "9238"),
    ("Stadshagen", "9239"),
    ("S:t Eriksplan", "9240"),
    ("Solnacentrum", "9241"),
    ("Västra skogen", "9242"),
    ("Huvudsta", "9243"),
    ("Solna strand", "9244"),
    ("Sundbybergs centrum", "9245"),
    ("Duvbo", "9246"),
    ("Sollentuna", "9247"),
    ("Rösersberg", "9248"),
    ("Hjulsta", "9249"),
    ("Tensta", "9250"),
    ("Rinkeby", "9251"),
    ("Spånga", "9252"),
    ("Sollentuna centrum", "9253"),
    ("Akalla", "9254"),
    ("Kista", "9255"),
    ("Husby", "9256"),
    ("Kungens kurva", "9257"),
];

/// Alternative spellings that resolve to a canonical station.
pub(super) const ALIASES: &[(&str, &str)] = &[
    ("T-centralen", "9001"),
    ("Tcentralen", "9001"),
];
