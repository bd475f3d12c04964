//! Shape fragments appended to a slide's shape tree.
//!
//! Fragments declare the `a` and `r` namespaces locally so they stay valid
//! whatever prefixes the host slide binds. The presentation prefix is taken
//! from the host's `spTree` element.

use crate::constants::{
    HUNDREDTHS_PER_POINT, NS_DRAWING, NS_RELATIONSHIPS, NS_SVG_BLIP, SVG_BLIP_EXT_URI, THEME_FONT,
};
use crate::deck::escape_xml;
use crate::geometry::EmuRect;

/// A picture frame to append
#[derive(Debug, Clone)]
pub struct PictureFrame<'a> {
    pub shape_id: u32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    /// Relationship of the blip that every consumer can display
    pub blip_rid: &'a str,
    /// Relationship of the SVG part when the blip is a raster fallback
    pub svg_rid: Option<&'a str>,
    pub rect: EmuRect,
}

/// `name` qualified with `prefix` (empty prefix means default namespace)
fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}:{}", prefix, name)
    }
}

/// `<p:pic>` element for `frame`
pub fn picture_xml(prefix: &str, frame: &PictureFrame<'_>) -> String {
    let p = |name: &str| qualify(prefix, name);
    let descr = frame
        .description
        .map(|d| format!(r#" descr="{}""#, escape_xml(d)))
        .unwrap_or_default();
    let ext_lst = frame
        .svg_rid
        .map(|svg_rid| {
            format!(
                r#"<a:extLst><a:ext uri="{}"><asvg:svgBlip xmlns:asvg="{}" r:embed="{}"/></a:ext></a:extLst>"#,
                SVG_BLIP_EXT_URI, NS_SVG_BLIP, svg_rid
            )
        })
        .unwrap_or_default();
    let EmuRect { x, y, cx, cy } = frame.rect;

    format!(
        concat!(
            r#"<{pic} xmlns:a="{ns_a}" xmlns:r="{ns_r}">"#,
            r#"<{nv_pic_pr}><{c_nv_pr} id="{id}" name="{name}"{descr}/>"#,
            r#"<{c_nv_pic_pr}><a:picLocks noChangeAspect="1"/></{c_nv_pic_pr}><{nv_pr}/></{nv_pic_pr}>"#,
            r#"<{blip_fill}><a:blip r:embed="{blip}">{ext_lst}</a:blip><a:stretch><a:fillRect/></a:stretch></{blip_fill}>"#,
            r#"<{sp_pr}><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></{sp_pr}>"#,
            r#"</{pic}>"#
        ),
        pic = p("pic"),
        nv_pic_pr = p("nvPicPr"),
        c_nv_pr = p("cNvPr"),
        c_nv_pic_pr = p("cNvPicPr"),
        nv_pr = p("nvPr"),
        blip_fill = p("blipFill"),
        sp_pr = p("spPr"),
        ns_a = NS_DRAWING,
        ns_r = NS_RELATIONSHIPS,
        id = frame.shape_id,
        name = escape_xml(frame.name),
        descr = descr,
        blip = frame.blip_rid,
        ext_lst = ext_lst,
        x = x,
        y = y,
        cx = cx,
        cy = cy,
    )
}

/// Native text box holding `text`, bold and centered
pub fn title_xml(prefix: &str, shape_id: u32, text: &str, size_pt: u32, rect: EmuRect) -> String {
    let p = |name: &str| qualify(prefix, name);
    let EmuRect { x, y, cx, cy } = rect;

    format!(
        concat!(
            r#"<{sp} xmlns:a="{ns_a}">"#,
            r#"<{nv_sp_pr}><{c_nv_pr} id="{id}" name="Title {id}"/><{c_nv_sp_pr} txBox="1"/><{nv_pr}/></{nv_sp_pr}>"#,
            r#"<{sp_pr}><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></{sp_pr}>"#,
            r#"<{tx_body}><a:bodyPr wrap="square" anchor="ctr"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#,
            r#"<a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="zh-CN" altLang="en-US" sz="{sz}" b="1">"#,
            r#"<a:latin typeface="{font}"/><a:ea typeface="{font}"/></a:rPr>"#,
            r#"<a:t>{text}</a:t></a:r></a:p></{tx_body}>"#,
            r#"</{sp}>"#
        ),
        sp = p("sp"),
        nv_sp_pr = p("nvSpPr"),
        c_nv_pr = p("cNvPr"),
        c_nv_sp_pr = p("cNvSpPr"),
        nv_pr = p("nvPr"),
        sp_pr = p("spPr"),
        tx_body = p("txBody"),
        ns_a = NS_DRAWING,
        id = shape_id,
        x = x,
        y = y,
        cx = cx,
        cy = cy,
        sz = size_pt * HUNDREDTHS_PER_POINT,
        font = THEME_FONT,
        text = escape_xml(text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame<'a>(svg_rid: Option<&'a str>) -> PictureFrame<'a> {
        PictureFrame {
            shape_id: 4,
            name: "Infographic",
            description: Some("chart & notes"),
            blip_rid: "rId2",
            svg_rid,
            rect: EmuRect::new(228_600, 1_105_000, 8_686_800, 2_931_000),
        }
    }

    #[test]
    fn test_picture_with_prefix() {
        let xml = picture_xml("p", &frame(None));
        assert!(xml.starts_with("<p:pic "));
        assert!(xml.ends_with("</p:pic>"));
        assert!(xml.contains(r#"<p:cNvPr id="4" name="Infographic" descr="chart &amp; notes"/>"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId2"></a:blip>"#));
        assert!(xml.contains(r#"<a:off x="228600" y="1105000"/><a:ext cx="8686800" cy="2931000"/>"#));
        assert!(!xml.contains("svgBlip"));
    }

    #[test]
    fn test_picture_with_svg_blip() {
        let xml = picture_xml("p", &frame(Some("rId3")));
        assert!(xml.contains(SVG_BLIP_EXT_URI));
        assert!(xml.contains(r#"<asvg:svgBlip xmlns:asvg="http://schemas.microsoft.com/office/drawing/2016/SVG/main" r:embed="rId3"/>"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId2">"#));
    }

    #[test]
    fn test_picture_default_namespace() {
        let xml = picture_xml("", &frame(None));
        assert!(xml.starts_with("<pic "));
        assert!(xml.contains("<nvPicPr><cNvPr "));
    }

    #[test]
    fn test_title_box() {
        let xml = title_xml("p", 5, "销售 <Q1>", 24, EmuRect::new(0, 0, 100, 50));
        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains(r#"sz="2400" b="1""#));
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(xml.contains("<a:t>销售 &lt;Q1&gt;</a:t>"));
        assert!(xml.contains(r#"<a:ea typeface="Noto Sans CJK SC"/>"#));
    }
}
