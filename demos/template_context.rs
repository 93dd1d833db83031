use eracun::render::to_template_context;
use eracun::xml;

fn main() {
    let xml = include_str!("../tests/fixtures/fiskalizacija_racun.xml");
    let invoice = xml::parse_invoice(xml).unwrap();

    let context = to_template_context(&invoice);
    println!("{}", serde_json::to_string_pretty(&context).unwrap());
}
