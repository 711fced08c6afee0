// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fixture records used across the workspace tests.

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Animal {
    pub name: String,
    pub legs: u32,
}

impl Animal {
    pub fn new(name: impl Into<String>, legs: u32) -> Self {
        Self {
            name: name.into(),
            legs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Plant {
    pub name: String,
    pub height: u32,
}

impl Plant {
    pub fn new(name: impl Into<String>, height: u32) -> Self {
        Self {
            name: name.into(),
            height,
        }
    }
}

/// Kind of a [`TestData`] record; handy as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataVariant {
    Person,
    Animal,
    Plant,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestData {
    Person(Person),
    Animal(Animal),
    Plant(Plant),
}

impl TestData {
    pub fn variant(&self) -> DataVariant {
        match self {
            TestData::Person(_) => DataVariant::Person,
            TestData::Animal(_) => DataVariant::Animal,
            TestData::Plant(_) => DataVariant::Plant,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TestData::Person(p) => &p.name,
            TestData::Animal(a) => &a.name,
            TestData::Plant(p) => &p.name,
        }
    }
}

impl Display for TestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestData::Person(p) => write!(f, "Person[name={}, age={}]", p.name, p.age),
            TestData::Animal(a) => write!(f, "Animal[name={}, legs={}]", a.name, a.legs),
            TestData::Plant(p) => write!(f, "Plant[name={}, height={}]", p.name, p.height),
        }
    }
}

pub fn person_alice() -> TestData {
    TestData::Person(Person::new("Alice", 25))
}

pub fn person_bob() -> TestData {
    TestData::Person(Person::new("Bob", 30))
}

pub fn person_charlie() -> TestData {
    TestData::Person(Person::new("Charlie", 35))
}

pub fn person_diane() -> TestData {
    TestData::Person(Person::new("Diane", 40))
}

pub fn animal_dog() -> TestData {
    TestData::Animal(Animal::new("Dog", 4))
}

pub fn animal_spider() -> TestData {
    TestData::Animal(Animal::new("Spider", 8))
}

pub fn animal_bird() -> TestData {
    TestData::Animal(Animal::new("Bird", 2))
}

pub fn plant_rose() -> TestData {
    TestData::Plant(Plant::new("Rose", 15))
}

pub fn plant_oak() -> TestData {
    TestData::Plant(Plant::new("Oak", 1000))
}

/// A mixed sequence where every kind appears more than once, interleaved.
pub fn mixed_sequence() -> Vec<TestData> {
    vec![
        person_alice(),
        animal_dog(),
        person_bob(),
        plant_rose(),
        animal_spider(),
        person_charlie(),
        plant_oak(),
        animal_bird(),
        person_diane(),
    ]
}
