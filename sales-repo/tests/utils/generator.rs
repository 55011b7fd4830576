use chrono::{DateTime, Duration, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use sales_repo::transaction_repo::{DateRange, Transaction};

pub trait Generator<T> {
    fn gen(&mut self) -> T;
}

pub struct Predefined<T> {
    values: Vec<T>,
    current_pos: usize,
}

impl<T> Predefined<T> {
    pub fn boxed(values: Vec<T>) -> Box<Predefined<T>> {
        Box::new(Predefined {
            values,
            current_pos: 0,
        })
    }
}

impl<T: Clone> Generator<T> for Predefined<T> {
    fn gen(&mut self) -> T {
        let v = self.values[self.current_pos % self.values.len()].clone();
        self.current_pos += 1;
        v
    }
}

pub struct RandomSample<T> {
    values: Vec<T>,
}

impl<T> RandomSample<T> {
    pub fn boxed(values: Vec<T>) -> Box<RandomSample<T>> {
        Box::new(RandomSample { values })
    }
}

impl<T: Clone> Generator<T> for RandomSample<T> {
    fn gen(&mut self) -> T {
        self.values.choose(&mut rand::thread_rng()).unwrap().clone()
    }
}

pub struct FakeSentence {
    words: std::ops::Range<usize>,
}

impl Generator<String> for FakeSentence {
    fn gen(&mut self) -> String {
        Sentence(self.words.clone()).fake()
    }
}

/// Non-negative prices with two decimal places, up to 1500.
pub struct FakePrice;

impl Generator<Decimal> for FakePrice {
    fn gen(&mut self) -> Decimal {
        Decimal::new(rand::thread_rng().gen_range(0..150_000), 2)
    }
}

pub struct FakeDate {
    range: DateRange,
}

impl Generator<DateTime<Utc>> for FakeDate {
    fn gen(&mut self) -> DateTime<Utc> {
        let seconds = (self.range.end - self.range.start).num_seconds();
        self.range.start + Duration::seconds(rand::thread_rng().gen_range(0..seconds))
    }
}

pub struct FakeSold;

impl Generator<bool> for FakeSold {
    fn gen(&mut self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }
}

pub struct TransactionGenerator {
    next_id: i32,
    title_gen: Box<dyn Generator<String>>,
    desc_gen: Box<dyn Generator<String>>,
    price_gen: Box<dyn Generator<Decimal>>,
    date_gen: Box<dyn Generator<DateTime<Utc>>>,
    sold_gen: Box<dyn Generator<bool>>,
    cat_gen: Box<dyn Generator<String>>,
}

#[allow(dead_code)]
impl TransactionGenerator {
    pub fn within(range: DateRange) -> TransactionGenerator {
        TransactionGenerator {
            next_id: 1,
            title_gen: Box::new(FakeSentence { words: 2..4 }),
            desc_gen: Box::new(FakeSentence { words: 5..10 }),
            price_gen: Box::new(FakePrice),
            date_gen: Box::new(FakeDate { range }),
            sold_gen: Box::new(FakeSold),
            cat_gen: RandomSample::boxed(vec![
                "electronics".to_string(),
                "jewelery".to_string(),
                "men's clothing".to_string(),
                "women's clothing".to_string(),
            ]),
        }
    }

    pub fn with_titles(mut self, titles: Vec<&str>) -> TransactionGenerator {
        let titles: Vec<String> = titles.into_iter().map(str::to_string).collect();
        self.title_gen = Predefined::boxed(titles);
        self
    }

    pub fn with_descriptions(mut self, descriptions: Vec<&str>) -> TransactionGenerator {
        let descriptions: Vec<String> = descriptions.into_iter().map(str::to_string).collect();
        self.desc_gen = Predefined::boxed(descriptions);
        self
    }

    pub fn with_prices(mut self, prices: Vec<Decimal>) -> TransactionGenerator {
        self.price_gen = Predefined::boxed(prices);
        self
    }

    pub fn with_dates(mut self, dates: Vec<DateTime<Utc>>) -> TransactionGenerator {
        self.date_gen = Predefined::boxed(dates);
        self
    }

    pub fn with_sold(mut self, sold: Vec<bool>) -> TransactionGenerator {
        self.sold_gen = Predefined::boxed(sold);
        self
    }

    pub fn with_categories(mut self, categories: Vec<&str>) -> TransactionGenerator {
        let categories: Vec<String> = categories.into_iter().map(str::to_string).collect();
        self.cat_gen = Predefined::boxed(categories);
        self
    }

    pub fn generate(&mut self) -> Transaction {
        let id = self.next_id;
        self.next_id += 1;
        Transaction::new(
            id,
            self.title_gen.gen(),
            self.desc_gen.gen(),
            self.price_gen.gen(),
            self.date_gen.gen(),
            self.sold_gen.gen(),
            self.cat_gen.gen(),
        )
    }

    pub fn generate_many(&mut self, count: usize) -> Vec<Transaction> {
        let mut vec = Vec::with_capacity(count);
        for _ in 0..count {
            vec.push(self.generate())
        }
        vec
    }
}
