//! Book abbreviations used by the cross-reference file
//! Maps the source list's mixed abbreviation styles to canonical codes

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    /// Abbreviations observed in the cross-reference source, with and
    /// without the space in numbered books. Lookup is exact; the caller
    /// falls back to matching the token against the codes themselves.
    static ref ABBREVIATION_TO_CODE: HashMap<&'static str, &'static str> = [
        ("Gen", "GEN"), ("Exod", "EXO"), ("Ex", "EXO"), ("Lev", "LEV"),
        ("Num", "NUM"), ("Deut", "DEU"), ("Josh", "JOS"), ("Judg", "JDG"),
        ("Jdgs", "JDG"), ("Ruth", "RUT"),
        ("1 Sam", "1SA"), ("1Sam", "1SA"), ("2 Sam", "2SA"), ("2Sam", "2SA"),
        ("1 Kgs", "1KI"), ("1Kgs", "1KI"), ("2 Kgs", "2KI"), ("2Kgs", "2KI"),
        ("1 Chr", "1CH"), ("1Chr", "1CH"), ("2 Chr", "2CH"), ("2Chr", "2CH"),
        ("Ezra", "EZR"), ("Neh", "NEH"), ("Esth", "EST"), ("Job", "JOB"),
        ("Ps", "PSA"), ("Psa", "PSA"), ("Prov", "PRO"), ("Eccl", "ECC"),
        ("Song", "SNG"), ("Isa", "ISA"), ("Jer", "JER"), ("Lam", "LAM"),
        ("Ezek", "EZK"), ("Dan", "DAN"), ("Hos", "HOS"), ("Joel", "JOL"),
        ("Amos", "AMO"), ("Obad", "OBA"), ("Jonah", "JON"), ("Mic", "MIC"),
        ("Nah", "NAM"), ("Hab", "HAB"), ("Zeph", "ZEP"), ("Hag", "HAG"),
        ("Zech", "ZEC"), ("Mal", "MAL"),
        ("Matt", "MAT"), ("Mark", "MRK"), ("Mk", "MRK"), ("Luke", "LUK"),
        ("Lk", "LUK"), ("John", "JHN"), ("Jn", "JHN"), ("Acts", "ACT"),
        ("Rom", "ROM"),
        ("1 Cor", "1CO"), ("1Cor", "1CO"), ("2 Cor", "2CO"), ("2Cor", "2CO"),
        ("Gal", "GAL"), ("Eph", "EPH"), ("Phil", "PHP"), ("Col", "COL"),
        ("1 Thess", "1TH"), ("1Thess", "1TH"), ("2 Thess", "2TH"), ("2Thess", "2TH"),
        ("1 Tim", "1TI"), ("1Tim", "1TI"), ("2 Tim", "2TI"),
        ("Titus", "TIT"), ("Phlm", "PHM"), ("Heb", "HEB"), ("Jas", "JAS"),
        ("1 Pet", "1PE"), ("1Pet", "1PE"), ("2 Pet", "2PE"), ("2Pet", "2PE"),
        ("1 John", "1JN"), ("1John", "1JN"), ("2 John", "2JN"), ("3 John", "3JN"),
        ("Jude", "JUD"), ("Rev", "REV"),
    ]
    .into_iter()
    .collect();
}

/// Look up a book abbreviation exactly as written, e.g. "Ps" or "1 Cor".
pub fn abbreviation_to_code(token: &str) -> Option<&'static str> {
    ABBREVIATION_TO_CODE.get(token).copied()
}
