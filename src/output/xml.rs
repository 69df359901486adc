use crate::model::PackageList;

pub fn generate_xml_string(packages: &PackageList) -> String {
    packages
        .iter()
        .map(|p| format!("<string>{}</string>\n", xml_escape(p)))
        .collect()
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&#34;")
        .replace('\'', "&#39;")
}
