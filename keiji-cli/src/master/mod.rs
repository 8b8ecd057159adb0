//! Master lookup tables: properties, vendors, inspection notices, templates
//!
//! All four collections are read-only and ordered. `properties` is
//! denormalized with one record per (property code, terminal id) pair; the
//! deduplicated property list and the terminal sublist for a property are
//! derived on demand. Entries denormalize vendor/notice values at creation
//! time, so nothing here is referenced after an entry is built.

use serde::{Deserialize, Serialize};

/// One (property, terminal) pair from the property master
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property code (e.g., 2010)
    #[serde(alias = "property_code")]
    pub code: u32,
    /// Property display name
    #[serde(alias = "property_name")]
    pub name: String,
    /// Signage terminal id (e.g., "h0001A00")
    pub terminal_id: String,
}

/// A maintenance vendor with its emergency contact number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(alias = "vendor_name")]
    pub name: String,
    pub emergency_contact: String,
}

/// An inspection-notice record: the poster template plus its default text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionNotice {
    /// Stable key for selection (selects are keyed by id, never by index)
    pub id: String,
    /// Display name (e.g., "エレベーター定期点検")
    #[serde(alias = "notice_name")]
    pub name: String,
    /// Category used by the bulk page's dropdown filter
    pub category: String,
    pub template_no: u32,
    pub default_text: String,
    pub show_on_board: bool,
}

/// A stock poster background keyed by template number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub template_no: u32,
    pub image_file: String,
}

/// The four master tables, loaded once per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterData {
    pub properties: Vec<Property>,
    pub vendors: Vec<Vendor>,
    pub inspection_notices: Vec<InspectionNotice>,
    pub templates: Vec<Template>,
}

impl MasterData {
    /// Built-in dataset used when the backend is unreachable or not configured
    pub fn defaults() -> Self {
        let properties = vec![
            property(2010, "アイランドシティ照葉テラス", "h0001A00"),
            property(2010, "アイランドシティ照葉テラス", "h0001B00"),
            property(2010, "アイランドシティ照葉テラス", "h0002A00"),
            property(2010, "アイランドシティ照葉テラス", "h0002B00"),
            property(2010, "アイランドシティ照葉テラス", "h0003A00"),
            property(2010, "アイランドシティ照葉テラス", "h0004A00"),
            property(2010, "アイランドシティ照葉テラス", "h0005A00"),
            property(120406, "薬院プレイスビル", "z1003A01"),
            property(1203, "天神センタービル", "t0101A00"),
            property(1203, "天神センタービル", "t0102A00"),
        ];
        let vendors = vec![
            vendor("九州エレベーター工業", "092-934-0407"),
            vendor("福岡ビルメンテナンス", "092-555-0199"),
            vendor("西日本設備サービス", "093-881-2230"),
        ];
        let inspection_notices = vec![
            notice(
                "elevator-periodic",
                "エレベーター定期点検",
                "点検",
                1,
                "エレベーターの定期点検を実施いたします。\n点検中はご利用いただけません。ご協力をお願いいたします。",
                true,
            ),
            notice(
                "cleaning-periodic",
                "定期清掃",
                "清掃",
                2,
                "共用部の定期清掃を実施いたします。\nご不便をおかけしますが、ご協力をお願いいたします。",
                true,
            ),
            notice(
                "construction",
                "工事のお知らせ",
                "工事",
                3,
                "下記日程にて工事を実施いたします。\n騒音が発生する場合がございます。ご了承ください。",
                true,
            ),
            notice(
                "water-outage",
                "断水のお知らせ",
                "設備",
                4,
                "設備点検のため断水いたします。\nご不便をおかけしますが、ご協力をお願いいたします。",
                false,
            ),
        ];
        let templates = vec![
            template(1, "notice_elevator.png"),
            template(2, "notice_cleaning.png"),
            template(3, "notice_construction.png"),
            template(4, "notice_water.png"),
        ];
        Self {
            properties,
            vendors,
            inspection_notices,
            templates,
        }
    }

    /// Empty tables; every lookup yields an empty option set
    pub fn empty() -> Self {
        Self {
            properties: Vec::new(),
            vendors: Vec::new(),
            inspection_notices: Vec::new(),
            templates: Vec::new(),
        }
    }

    /// Deduplicated property list, by first occurrence of each code
    pub fn property_list(&self) -> Vec<(u32, &str)> {
        let mut seen = Vec::new();
        let mut list = Vec::new();
        for p in &self.properties {
            if !seen.contains(&p.code) {
                seen.push(p.code);
                list.push((p.code, p.name.as_str()));
            }
        }
        list
    }

    /// Terminal ids for a property, in master order
    pub fn terminals_for(&self, code: u32) -> Vec<String> {
        self.properties
            .iter()
            .filter(|p| p.code == code)
            .map(|p| p.terminal_id.clone())
            .collect()
    }

    pub fn property_name(&self, code: u32) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.code == code)
            .map(|p| p.name.as_str())
    }

    pub fn vendor(&self, name: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.name == name)
    }

    pub fn notice(&self, id: &str) -> Option<&InspectionNotice> {
        self.inspection_notices.iter().find(|n| n.id == id)
    }

    pub fn notice_by_name(&self, name: &str) -> Option<&InspectionNotice> {
        self.inspection_notices.iter().find(|n| n.name == name)
    }

    /// Notices in a category, preserving master order
    pub fn notices_in_category(&self, category: &str) -> Vec<&InspectionNotice> {
        self.inspection_notices
            .iter()
            .filter(|n| n.category == category)
            .collect()
    }

    /// Image file for a template number, if registered
    pub fn template_image(&self, template_no: u32) -> Option<&str> {
        self.templates
            .iter()
            .find(|t| t.template_no == template_no)
            .map(|t| t.image_file.as_str())
    }
}

impl Default for MasterData {
    fn default() -> Self {
        Self::defaults()
    }
}

fn property(code: u32, name: &str, terminal_id: &str) -> Property {
    Property {
        code,
        name: name.to_string(),
        terminal_id: terminal_id.to_string(),
    }
}

fn vendor(name: &str, emergency_contact: &str) -> Vendor {
    Vendor {
        name: name.to_string(),
        emergency_contact: emergency_contact.to_string(),
    }
}

fn notice(
    id: &str,
    name: &str,
    category: &str,
    template_no: u32,
    default_text: &str,
    show_on_board: bool,
) -> InspectionNotice {
    InspectionNotice {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        template_no,
        default_text: default_text.to_string(),
        show_on_board,
    }
}

fn template(template_no: u32, image_file: &str) -> Template {
    Template {
        template_no,
        image_file: image_file.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_list_dedupes_by_first_occurrence() {
        let masters = MasterData::defaults();
        let list = masters.property_list();
        let codes: Vec<u32> = list.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes, vec![2010, 120406, 1203]);
    }

    #[test]
    fn test_terminals_for_known_properties() {
        let masters = MasterData::defaults();

        let terminals = masters.terminals_for(2010);
        assert_eq!(terminals.len(), 7);
        assert_eq!(terminals[0], "h0001A00");

        let terminals = masters.terminals_for(120406);
        assert_eq!(terminals, vec!["z1003A01".to_string()]);
    }

    #[test]
    fn test_unknown_property_yields_empty_terminal_list() {
        let masters = MasterData::defaults();
        assert!(masters.terminals_for(999999).is_empty());
    }

    #[test]
    fn test_vendor_lookup_by_name() {
        let masters = MasterData::defaults();
        let v = masters.vendor("九州エレベーター工業").unwrap();
        assert_eq!(v.emergency_contact, "092-934-0407");
        assert!(masters.vendor("存在しない業者").is_none());
    }

    #[test]
    fn test_notice_lookup_by_id_and_name() {
        let masters = MasterData::defaults();
        let n = masters.notice("elevator-periodic").unwrap();
        assert_eq!(n.template_no, 1);
        assert_eq!(
            masters.notice_by_name("定期清掃").unwrap().id,
            "cleaning-periodic"
        );
    }

    #[test]
    fn test_category_filter() {
        let masters = MasterData::defaults();
        let cleaning = masters.notices_in_category("清掃");
        assert_eq!(cleaning.len(), 1);
        assert_eq!(cleaning[0].name, "定期清掃");
        assert!(masters.notices_in_category("未知").is_empty());
    }

    #[test]
    fn test_empty_masters_produce_empty_option_sets() {
        let masters = MasterData::empty();
        assert!(masters.property_list().is_empty());
        assert!(masters.terminals_for(2010).is_empty());
        assert!(masters.vendor("九州エレベーター工業").is_none());
    }
}
