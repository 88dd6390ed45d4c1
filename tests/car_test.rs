use facetdb::{structural, CompositeKey, Database, Facet};

#[derive(Debug, Clone, PartialEq)]
struct Engine {
    kind: String,
    horsepower: i32,
    capacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Manufacturer {
    name: String,
    country: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Car {
    model: String,
    brand: String,
    year: i32,
    color: String,
    engine: Engine,
    manufacturer: Manufacturer,
    price: f64,
}

structural!(Engine { kind: "type", horsepower: "horsepower", capacity: "capacity" });
structural!(Manufacturer { name: "name", country: "country" });
structural!(Car {
    model: "model",
    brand: "brand",
    year: "year",
    color: "color",
    engine,
    manufacturer,
    price: "price",
});

fn car_id(c: &Car) -> String {
    format!("{}-{}", c.model, c.manufacturer.name)
}

fn car_facets(c: &Car) -> Vec<Facet> {
    vec![
        Facet::new("model", &c.model),
        Facet::new("brand", &c.brand),
        Facet::new("year", &c.year),
        Facet::new("color", &c.color),
        Facet::new("manufacturer", &c.manufacturer.name),
        Facet::new("country", &c.manufacturer.country),
    ]
}

fn manual_db() -> Database<Car> {
    Database::new(car_id, car_facets)
}

fn car(model: &str, brand: &str, color: &str, maker: &str) -> Car {
    Car {
        model: model.to_string(),
        brand: brand.to_string(),
        year: 2021,
        color: color.to_string(),
        engine: Engine {
            kind: "V8".to_string(),
            horsepower: 400,
            capacity: 4.0,
        },
        manufacturer: Manufacturer {
            name: maker.to_string(),
            country: "USA".to_string(),
        },
        price: 79999.5,
    }
}

fn full_key(c: &Car) -> String {
    CompositeKey::from_facets(&car_facets(c)).into_string()
}

#[test]
fn test_car_full_key_search() {
    let db = manual_db();
    let c = car("ModelS", "Tesla", "Red", "acme");
    db.insert(c.clone());

    assert_eq!(
        full_key(&c),
        "model:ModelS:brand:Tesla:year:2021:color:Red:manufacturer:acme:country:USA"
    );
    assert_eq!(db.search(&full_key(&c)), vec![c]);
    assert_eq!(db.key_count(), 63);
}

#[test]
fn test_car_update_via_delete_old_insert_new() {
    let db = manual_db();
    let old = car("ModelS", "Tesla", "Red", "acme");
    db.insert(old.clone());

    let mut new = old.clone();
    new.color = "Magenta".to_string();
    db.delete(&old);
    db.insert(new.clone());

    assert_eq!(db.search(&full_key(&new)), vec![new.clone()]);
    assert!(db.search(&full_key(&old)).is_empty());
    assert!(db.search("color:Red").is_empty());
    assert_eq!(db.search("color:Magenta"), vec![new]);
    assert_eq!(db.count(), 1);
}

#[test]
fn test_car_update_after_in_place_mutation_leaves_stale_postings() {
    let db = manual_db();
    let mut c = car("ModelS", "Tesla", "Red", "acme");
    db.insert(c.clone());

    c.color = "Magenta".to_string();
    db.update(c.clone());

    // New keys are installed...
    assert_eq!(db.search(&full_key(&c)), vec![c.clone()]);
    // ...but the old ones were never retracted and now resolve to the new state.
    assert_eq!(db.postings("color:Red"), Some(vec!["ModelS-acme".to_string()]));
    assert_eq!(db.search("color:Red"), vec![c]);
}

#[test]
fn test_car_delete() {
    let db = manual_db();
    let c = car("Model3", "Tesla", "Blue", "acme");
    db.insert(c.clone());
    db.delete(&c);

    assert!(db.search(&full_key(&c)).is_empty());
    for facet in car_facets(&c) {
        assert!(db.search(facet.as_str()).is_empty());
    }
    assert_eq!(db.count(), 0);
}

#[test]
fn test_car_search_non_existent() {
    let db = manual_db();
    db.insert(car("ModelX", "Tesla", "Black", "acme"));

    assert!(db
        .search("model:NonExistent:brand:Fake:year:0:color:None:manufacturer:None:country:None")
        .is_empty());
    assert!(db.search("").is_empty());
    assert_eq!(db.search_random("brand:Fake"), None);
}

#[test]
fn test_car_multiple_insert() {
    let db = manual_db();
    let teslas: Vec<Car> = (0..3)
        .map(|i| car("ModelY", "Tesla", "White", &format!("maker{}", i)))
        .collect();
    db.insert_many(teslas.clone());
    db.insert(car("i4", "BMW", "White", "bmw"));

    assert_eq!(db.count(), 4);
    assert_eq!(db.search("brand:Tesla"), teslas);
    assert_eq!(db.search("color:White").len(), 4);
    assert_eq!(db.search("brand:BMW:color:White").len(), 1);
}

#[test]
fn test_car_query_order_sensitivity() {
    let db = manual_db();
    let c = car("ModelX", "Tesla", "Silver", "acme");
    db.insert(c.clone());

    assert_eq!(db.search("model:ModelX:brand:Tesla"), vec![c]);
    assert!(db.search("brand:Tesla:model:ModelX").is_empty());
}

#[test]
fn test_car_structural_extraction() {
    let db = Database::structural(car_id);
    let c = car("Roadster", "Tesla", "Red", "acme");
    db.insert(c.clone());

    // 10 facets: model, brand, year, color, type, horsepower, capacity, name, country, price
    assert_eq!(db.key_count(), 1023);
    assert_eq!(db.search("type:V8:horsepower:400:capacity:4"), vec![c.clone()]);
    assert_eq!(db.search("model:Roadster:name:acme:price:79999.5"), vec![c]);
}
