pub const EVIDENCE_STRINGS_FILE_NAME: &str = "evidence_strings.json";
pub const NSV_LIST_FILE_NAME: &str = "nsv_list.txt";
pub const UNMAPPED_TRAITS_FILE_NAME: &str = "unmappedTraits.tsv";
pub const ZOOMA_FILE_NAME: &str = "eva_clinvar.txt";

pub const UNMAPPED_TRAITS_HEADER: &str = "Trait\tCount";
pub const ZOOMA_HEADER: &str =
    "STUDY\tBIOENTITY\tPROPERTY_TYPE\tPROPERTY_VALUE\tSEMANTIC_TAG\tANNOTATOR\tANNOTATION_DATE";

pub const ZOOMA_PROPERTY_TYPE: &str = "disease";
pub const ZOOMA_ANNOTATOR: &str = "eva";
/// UTC, e.g. `17/10/26 09:30`
pub const ZOOMA_DATE_FORMAT: &str = "%d/%m/%y %H:%M";
